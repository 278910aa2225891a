//! This module encodes a machine's state table onto a tape as a framed text
//! stream, and decodes such tapes back into their in-memory model.
//!
//! The frame borrows the C0 control characters the way serial tape formats
//! did: STX/ETX bracket the frame, GS splits the initial/rules/finals
//! sections, RS separates state records, and US terminates each field within
//! a record, so multi-field states are distinguishable from single-field
//! ones:
//!
//! ```text
//! STX initial RS GS (key RS target RS)* GS (final RS)* ETX
//! ```
//!
//! A state's fields are its non-empty parts in order -- `init US`,
//! `init US 1 US`, `init US 1 US R US`.

use thiserror::Error;

use crate::state::{Direction, State, StateKey};
use crate::tape::Tape;
use crate::transition::TransitionFn;
use crate::types::{ETX, GS, RS, STX, US};

/// Errors from decoding a framed state table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The tape does not carry an STX..ETX frame.
    #[error("tape is not a framed state table (missing STX/ETX)")]
    Unframed,
    /// The frame does not split into initial/rules/finals sections.
    #[error("expected 3 sections between STX and ETX, found {0}")]
    BadSectionCount(usize),
    /// A section that requires a state record had none.
    #[error("empty state record")]
    EmptyState,
    /// A state record did not parse.
    #[error("malformed state record: {0}")]
    BadRecord(String),
    /// The rules section held a key with no target.
    #[error("rules section holds an unpaired state record")]
    UnpairedRule,
}

/// The in-memory model of a decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub initial: State,
    pub rules: Vec<(State, State)>,
    pub finals: Vec<State>,
}

impl Encoded {
    /// Rebuilds a transition function from the decoded rule pairs.
    pub fn transition_fn(&self) -> Result<TransitionFn, crate::types::MachineError> {
        TransitionFn::from_rules(self.rules.iter().cloned())
    }
}

/// Encodes an initial state, a transition table, and the final states onto a
/// fresh tape, written through the tape's sequential cursor.
///
/// Rules are emitted in `(name, symbol)` order so equal tables produce equal
/// tapes.
pub fn encode(initial: &State, rules: &TransitionFn, finals: &[State]) -> Tape {
    let mut tape = Tape::new();
    tape.write(&STX.to_string());

    tape.write(&state_fields(initial));
    tape.write(&RS.to_string());

    tape.write(&GS.to_string());
    for (key, target) in rules.pairs() {
        tape.write(&key_fields(key));
        tape.write(&RS.to_string());
        tape.write(&state_fields(target));
        tape.write(&RS.to_string());
    }

    tape.write(&GS.to_string());
    for state in finals {
        tape.write(&state_fields(state));
        tape.write(&RS.to_string());
    }

    tape.write(&ETX.to_string());
    tape
}

fn state_fields(state: &State) -> String {
    let mut out = String::new();
    out.push_str(state.name());
    out.push(US);
    if let Some(sym) = state.symbol() {
        out.push(sym);
        out.push(US);
    }
    if let Some(dir) = state.direction() {
        out.push_str(dir.token());
        out.push(US);
    }
    out
}

fn key_fields(key: &StateKey) -> String {
    let mut out = String::new();
    out.push_str(&key.name);
    out.push(US);
    if let Some(sym) = key.symbol {
        out.push(sym);
        out.push(US);
    }
    out
}

/// Decodes a framed state table from a tape.
pub fn decode(tape: &Tape) -> Result<Encoded, EncodeError> {
    let text = tape.to_string();
    let body = text
        .strip_prefix(STX)
        .and_then(|t| t.strip_suffix(ETX))
        .ok_or(EncodeError::Unframed)?;

    let sections: Vec<&str> = body.split(GS).collect();
    if sections.len() != 3 {
        return Err(EncodeError::BadSectionCount(sections.len()));
    }

    let initial = parse_section(sections[0])?
        .into_iter()
        .next()
        .ok_or(EncodeError::EmptyState)?;

    let rule_states = parse_section(sections[1])?;
    if rule_states.len() % 2 != 0 {
        return Err(EncodeError::UnpairedRule);
    }
    let rules = rule_states
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    let finals = parse_section(sections[2])?;

    Ok(Encoded {
        initial,
        rules,
        finals,
    })
}

fn parse_section(section: &str) -> Result<Vec<State>, EncodeError> {
    section
        .split(RS)
        .filter(|record| !record.is_empty())
        .map(parse_state)
        .collect()
}

fn parse_state(record: &str) -> Result<State, EncodeError> {
    let fields: Vec<&str> = record.split(US).collect();
    // every field carries a trailing US, so a well-formed record splits into
    // its fields plus one empty tail
    let fields = match fields.split_last() {
        Some((&"", rest)) => rest,
        _ => return Err(EncodeError::BadRecord(record.escape_default().to_string())),
    };

    match fields {
        [] => Err(EncodeError::EmptyState),
        [name] => Ok(State::new(*name)),
        [name, symbol] => Ok(State::with(*name, parse_symbol(symbol)?, None)),
        [name, symbol, direction] => Ok(State::with(
            *name,
            parse_symbol(symbol)?,
            Direction::parse(direction),
        )),
        _ => Err(EncodeError::BadRecord(record.escape_default().to_string())),
    }
}

fn parse_symbol(field: &str) -> Result<char, EncodeError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(sym), None) => Ok(sym),
        _ => Err(EncodeError::BadRecord(field.escape_default().to_string())),
    }
}
