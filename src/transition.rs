//! This module defines the transition function: a sparse mapping from
//! `(state name, expected symbol)` keys to target states.
//!
//! Lookup defaults to returning the query unchanged, so a state with no
//! outgoing rule rewrites the symbol it just read and stays put. Sparse
//! tables therefore halt by convergence rather than by exception; callers
//! are still expected to poll the machine's `is_done` and stop stepping.

use std::collections::HashMap;

use crate::state::{State, StateKey};
use crate::types::MachineError;

/// A mapping from key states to target states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionFn {
    rules: HashMap<StateKey, State>,
}

impl TransitionFn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(key, target)` pairs, validating each.
    pub fn from_rules<I>(rules: I) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = (State, State)>,
    {
        let mut table = Self::new();
        for (key, target) in rules {
            table.add(key, target)?;
        }
        Ok(table)
    }

    /// Registers a rule keyed by the state's `(name, symbol)` pair.
    ///
    /// A target without a symbol to write can never be applied by the
    /// execution step, so it is rejected here rather than failing mid-run.
    pub fn add(&mut self, key: State, target: State) -> Result<(), MachineError> {
        if target.symbol().is_none() {
            return Err(MachineError::MissingWriteSymbol(target.to_string()));
        }
        self.rules.insert(key.key(), target);
        Ok(())
    }

    /// Looks up the target for a query state, defaulting to the query itself
    /// when no rule matches. The query's direction field plays no part in
    /// matching.
    pub fn lookup(&self, query: &State) -> State {
        self.rules
            .get(&query.key())
            .cloned()
            .unwrap_or_else(|| query.clone())
    }

    /// Whether a rule is registered for this exact `(name, symbol)` key.
    pub fn contains(&self, key: &StateKey) -> bool {
        self.rules.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// The registered rules in deterministic `(name, symbol)` order.
    pub fn pairs(&self) -> Vec<(&StateKey, &State)> {
        let mut pairs: Vec<_> = self.rules.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}
