//! Collaborator interfaces for the ATN simulator (spec §1, §6): the core
//! defines these traits and calls into them; the deep prediction algorithm
//! (closure/reach, SLL→LL fallback, DFA-state caching) lives on the other
//! side of this seam. `atn_simulator`/`lexer_atn_simulator`/
//! `parser_atn_simulator` ship one concrete, fully-working implementation
//! of each trait (single-token SLL-style lookahead over the ATN graph with
//! a DFA cache) so the rest of the crate has something real to run
//! against; a fuller ALL(*) engine can be swapped in behind the same
//! traits without touching `Lexer`/`Parser`.

use std::rc::Rc;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::atn::ATN;
use crate::char_stream::CharStream;
use crate::dfa::DFA;
use crate::errors::ANTLRError;
use crate::prediction_context::PredictionContext;
use crate::token_stream::TokenStream;

/// Shared state every ATN simulator variant carries (spec §5: "the DFA
/// cache and prediction-context cache held by an ATN simulator").
pub struct ATNSimulatorState {
    pub atn: Arc<ATN>,
    pub decision_to_dfa: RwLock<Vec<DFA>>,
    pub shared_context_cache: RwLock<Option<Rc<PredictionContext>>>,
}

impl ATNSimulatorState {
    pub fn new(atn: Arc<ATN>) -> Self {
        let num_decisions = atn.decision_to_state.len();
        let decision_to_dfa = (0..num_decisions).map(DFA::new).collect();
        ATNSimulatorState {
            atn,
            decision_to_dfa: RwLock::new(decision_to_dfa),
            shared_context_cache: RwLock::new(None),
        }
    }

    pub fn reset(&self) {
        let mut dfas = self.decision_to_dfa.write();
        for dfa in dfas.iter_mut() {
            *dfa = DFA::new(dfa.decision);
        }
    }
}

pub trait ATNSimulator {
    fn atn(&self) -> &Arc<ATN>;
    fn reset(&mut self);
}

/// Chain of ATN states that called into each enclosing rule, innermost
/// first. Stands in for the full `ParserRuleContext` chain the reference
/// runtimes pass into `adaptivePredict`/`ATN.nextTokens`, since FOLLOW
/// computation only ever needs the invoking-state numbers (see
/// `ATN::next_tokens`).
pub type CallStack = [usize];

pub trait LexerATNSimulator: ATNSimulator {
    /// Drives the lexer's inner match loop for one token attempt, starting
    /// `mode`. Mutates internal line/column tracking and consumes `input`
    /// as it goes. Fails with `LexerNoViableAlt` carrying `start_index` if
    /// no rule matches.
    fn lexer_match(&mut self, input: &mut dyn CharStream, mode: usize) -> Result<isize, ANTLRError>;
    fn consume(&mut self, input: &mut dyn CharStream);
    fn line(&self) -> isize;
    fn char_position_in_line(&self) -> isize;
}

pub trait ParserATNSimulator: ATNSimulator {
    /// Resolves which alternative to take at `decision`, consulting (but
    /// not consuming) lookahead from `input`. `call_stack` provides the
    /// context needed to disambiguate across rule boundaries.
    fn adaptive_predict(
        &mut self,
        input: &mut dyn TokenStream,
        decision: usize,
        call_stack: &CallStack,
    ) -> Result<isize, ANTLRError>;
}
