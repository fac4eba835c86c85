//! A minimal, fully-working `ParserATNSimulator`: single-token (SLL-style)
//! lookahead prediction over a decision's alternative transitions, falling
//! back to the enclosing rule's FOLLOW when an alternative can only be
//! confirmed by exiting the current rule (loop-exit decisions). This
//! stands in for full ALL(*) (closure/reach/ambiguity resolution/DFA
//! caching across calls) per the collaborator boundary spec §1/§6 draws;
//! see `SPEC_FULL.md` and `DESIGN.md` for the scope decision.

use std::sync::Arc;

use crate::atn::ATN;
use crate::atn_simulator::{ATNSimulator, ATNSimulatorState, CallStack, ParserATNSimulator};
use crate::errors::ANTLRError;
use crate::int_stream::IntStream;
use crate::token::{TOKEN_EOF, TOKEN_EPSILON};
use crate::token_stream::TokenStream;

pub struct DefaultParserATNSimulator {
    state: ATNSimulatorState,
}

impl DefaultParserATNSimulator {
    pub fn new(atn: Arc<ATN>) -> Self {
        DefaultParserATNSimulator { state: ATNSimulatorState::new(atn) }
    }
}

impl ATNSimulator for DefaultParserATNSimulator {
    fn atn(&self) -> &Arc<ATN> {
        &self.state.atn
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}

impl ParserATNSimulator for DefaultParserATNSimulator {
    fn adaptive_predict(
        &mut self,
        input: &mut dyn TokenStream,
        decision: usize,
        call_stack: &CallStack,
    ) -> Result<isize, ANTLRError> {
        let atn = self.state.atn.clone();
        let decision_state = atn.decision_to_state[decision];
        let la1 = input.la(1);

        for (i, t) in atn.state(decision_state).transitions.iter().enumerate() {
            let target = t.target();
            let mut set = atn.next_tokens_in_same_rule(target);
            if set.contains(TOKEN_EPSILON) {
                set = atn.next_tokens(target, call_stack);
            }
            let matches_eof = la1 == crate::int_stream::EOF && set.contains(TOKEN_EOF);
            if set.contains(la1) || matches_eof {
                return Ok((i + 1) as isize);
            }
        }
        Err(ANTLRError::NoViableAlt {
            start_token: None,
            offending_token: None,
            input_text: String::new(),
        })
    }
}
