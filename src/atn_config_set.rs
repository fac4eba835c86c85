//! `ATNConfigSet` (spec §3): set of `ATNConfig`s, merged by graph context,
//! mutable while being built by the simulator and read-only once it has
//! seeded a DFA state.

use std::collections::HashMap;
use std::rc::Rc;

use crate::atn_config::{ATNConfig, SemanticContext};
use crate::bit_set::BitSet;
use crate::errors::ANTLRError;
use crate::prediction_context::PredictionContext;

#[derive(Debug, Default)]
pub struct ATNConfigSet {
    configs: Vec<ATNConfig>,
    /// Dedup index while mutable; keyed by `(state, alt, semanticContext)`
    /// per spec §3 ("identity-compared by (state,alt,semanticContext)
    /// tuples while mutable").
    index: HashMap<(usize, isize, SemanticContext), usize>,
    pub full_ctx: bool,
    pub unique_alt: isize,
    pub conflicting_alts: Option<BitSet>,
    pub has_semantic_context: bool,
    pub dips_into_outer_context: bool,
    read_only: bool,
}

impl ATNConfigSet {
    pub fn new(full_ctx: bool) -> Self {
        ATNConfigSet {
            configs: Vec::new(),
            index: HashMap::new(),
            full_ctx,
            unique_alt: crate::atn::INVALID_ALT_NUMBER,
            conflicting_alts: None,
            has_semantic_context: false,
            dips_into_outer_context: false,
            read_only: false,
        }
    }

    /// Adds `config`, merging its context with any existing config sharing
    /// the same `(state, alt, semanticContext)` identity.
    pub fn add(&mut self, config: ATNConfig) -> Result<(), ANTLRError> {
        if self.read_only {
            return Err(ANTLRError::IllegalStateError(
                "cannot mutate a read-only ATNConfigSet".to_owned(),
            ));
        }
        if !matches!(config.semantic_context, SemanticContext::None) {
            self.has_semantic_context = true;
        }
        if config.dips_into_outer_context {
            self.dips_into_outer_context = true;
        }
        let key = config.identity_key();
        if let Some(&i) = self.index.get(&key) {
            let existing = &mut self.configs[i];
            if let (Some(a), Some(b)) = (&existing.context, &config.context) {
                existing.context = Some(PredictionContext::merge(a, b));
            } else if existing.context.is_none() {
                existing.context = config.context;
            }
        } else {
            self.index.insert(key, self.configs.len());
            self.configs.push(config);
        }
        Ok(())
    }

    pub fn mark_read_only(&mut self) {
        self.read_only = true;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn configs(&self) -> &[ATNConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Alt numbers present in this set, used to decide ambiguity/conflict.
    pub fn alts(&self) -> BitSet {
        let mut bs = BitSet::new();
        for c in &self.configs {
            if c.alt >= 0 {
                bs.set(c.alt as usize);
            }
        }
        bs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atn_config::ATNConfig;

    #[test]
    fn duplicate_identity_merges_context() {
        let mut set = ATNConfigSet::new(false);
        set.add(ATNConfig::new(1, 1, Some(PredictionContext::singleton(None, 5)))).unwrap();
        set.add(ATNConfig::new(1, 1, Some(PredictionContext::singleton(None, 9)))).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn read_only_rejects_further_mutation() {
        let mut set = ATNConfigSet::new(false);
        set.mark_read_only();
        let err = set.add(ATNConfig::new(1, 1, None));
        assert!(err.is_err());
    }

    #[test]
    fn alts_collects_distinct_alternatives() {
        let mut set = ATNConfigSet::new(false);
        set.add(ATNConfig::new(1, 1, None)).unwrap();
        set.add(ATNConfig::new(2, 2, None)).unwrap();
        let alts = set.alts();
        assert!(alts.get(1));
        assert!(alts.get(2));
    }
}
