//! This module defines the control-state model: a `State` carrying a name, an
//! optional symbol to write, and an optional head movement, plus the
//! `StateKey` pair type used to key transition tables.
//!
//! The original formulation of this model compared states by name alone while
//! hashing over `(name, symbol)`, which breaks the hash/equality contract.
//! Here the two behaviors are split into explicit operations: [`State::same_name`]
//! for current-vs-final comparisons, and [`State::key`] for table lookups.

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::types::Symbol;

lazy_static! {
    static ref RIGHT_TOKENS: HashSet<&'static str> =
        ["R", "1", "+", "+1", ">", "→", "->"].into_iter().collect();
    static ref LEFT_TOKENS: HashSet<&'static str> =
        ["L", "-1", "-", "<", "←", "<-"].into_iter().collect();
}

/// Head movement attached to a transition target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Stay,
}

impl Direction {
    /// Parses a movement token. Accepts the usual spellings for each
    /// direction; anything unrecognized is no movement at all.
    pub fn parse(token: &str) -> Option<Direction> {
        if RIGHT_TOKENS.contains(token) {
            Some(Direction::Right)
        } else if LEFT_TOKENS.contains(token) {
            Some(Direction::Left)
        } else if matches!(token, "S" | "N" | "0") {
            Some(Direction::Stay)
        } else {
            None
        }
    }

    /// The head displacement this direction produces.
    pub fn delta(&self) -> i64 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            Direction::Stay => 0,
        }
    }

    /// Canonical single-letter token.
    pub fn token(&self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Stay => "S",
        }
    }
}

/// A control state.
///
/// Used two ways: as a lookup key (`name` plus the symbol expected under the
/// head) and as a transition target (`name`, the symbol to write, and the
/// direction to move). `symbol` and `direction` are `None` when the state is
/// a bare label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    name: String,
    symbol: Option<Symbol>,
    direction: Option<Direction>,
}

impl State {
    /// A bare named state with no symbol or direction.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            direction: None,
        }
    }

    pub fn with(
        name: impl Into<String>,
        symbol: impl Into<Option<Symbol>>,
        direction: impl Into<Option<Direction>>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            direction: direction.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// A copy of this state with the symbol replaced -- how an observed
    /// symbol gets attached to an otherwise bare control state before a
    /// transition lookup.
    pub fn derive_symbol(&self, symbol: Symbol) -> State {
        State {
            name: self.name.clone(),
            symbol: Some(symbol),
            direction: self.direction,
        }
    }

    /// Head displacement of the carried direction; none means stay.
    pub fn delta(&self) -> i64 {
        self.direction.map_or(0, |d| d.delta())
    }

    /// Name-only comparison, for current-state vs final-state checks.
    pub fn same_name(&self, other: &State) -> bool {
        self.name == other.name
    }

    /// The `(name, symbol)` pair this state occupies in a transition table.
    pub fn key(&self) -> StateKey {
        StateKey {
            name: self.name.clone(),
            symbol: self.symbol,
        }
    }
}

impl fmt::Display for State {
    /// Renders as `name[, symbol][, direction]`, quoting the symbol when it
    /// is whitespace so blank writes stay visible.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(sym) = self.symbol {
            if sym.is_whitespace() {
                write!(f, ", {:?}", sym)?;
            } else {
                write!(f, ", {}", sym)?;
            }
        }
        if let Some(dir) = self.direction {
            write!(f, ", {}", dir.token())?;
        }
        Ok(())
    }
}

/// Transition-table key: a state name together with the symbol expected under
/// the head. Ordinary consistent equality and hashing, so two rules with the
/// same name but different expected symbols are genuinely distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    pub name: String,
    pub symbol: Option<Symbol>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLANK;

    #[test]
    fn test_display_forms() {
        assert_eq!(State::new("one").to_string(), "one");
        assert_eq!(State::with("one", '0', None).to_string(), "one, 0");
        assert_eq!(
            State::with("one", '0', Direction::Right).to_string(),
            "one, 0, R"
        );
        assert_eq!(State::with("one", BLANK, None).to_string(), "one, ' '");
    }

    #[test]
    fn test_derive_symbol() {
        let s = State::with("init", '0', Direction::Left);
        let derived = s.derive_symbol('1');
        assert_eq!(derived.name(), "init");
        assert_eq!(derived.symbol(), Some('1'));
        assert_eq!(derived.direction(), Some(Direction::Left));
    }

    #[test]
    fn test_movement_delta() {
        assert_eq!(State::with("s", '0', Direction::Right).delta(), 1);
        assert_eq!(State::with("s", '0', Direction::Left).delta(), -1);
        assert_eq!(State::with("s", '0', Direction::Stay).delta(), 0);
        assert_eq!(State::new("s").delta(), 0);
    }

    #[test]
    fn test_direction_tokens() {
        for token in ["R", "1", "+", "+1", ">", "→", "->"] {
            assert_eq!(Direction::parse(token), Some(Direction::Right), "{token}");
        }
        for token in ["L", "-1", "-", "<", "←", "<-"] {
            assert_eq!(Direction::parse(token), Some(Direction::Left), "{token}");
        }
        assert_eq!(Direction::parse("N"), Some(Direction::Stay));
        assert_eq!(Direction::parse("S"), Some(Direction::Stay));
        assert_eq!(Direction::parse("sideways"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn test_same_name_vs_distinct_keys() {
        // one name, two expected symbols: the same "state" by name, but two
        // different table entries
        let s1 = State::with("x", '0', None);
        let s2 = State::with("x", '1', None);

        assert!(s1.same_name(&s2));
        assert_ne!(s1.key(), s2.key());

        let keys: HashSet<StateKey> = [s1.key(), s2.key()].into_iter().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }
}
