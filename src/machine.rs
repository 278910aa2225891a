//! This module defines the `TuringMachine` struct: the stepping engine that
//! ties a tape, a head position, a current state, and a transition function
//! together.
//!
//! The engine is fully synchronous and deterministic. Each `step` reads the
//! symbol under the head, queries the transition function, writes, moves, and
//! adopts the target state. It never halts itself: once the current state
//! name is in the final set, `is_done` reports true and the caller is
//! expected to stop stepping. There is no internal step limit either --
//! bounding execution against a non-halting table is the caller's job.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{Direction, State};
use crate::tape::Tape;
use crate::transition::TransitionFn;
use crate::types::Symbol;

/// A single-tape Turing machine.
///
/// Only the state *name* persists between steps; the symbol under the head is
/// recomputed from the tape on every query.
pub struct TuringMachine {
    tape: Tape,
    head: i64,
    state: String,
    final_states: HashSet<String>,
    transition: TransitionFn,
    steps: usize,
}

/// Structured record of one execution step.
///
/// Emitted by [`TuringMachine::step`] instead of ambient logging; callers that
/// want a trace forward these wherever they like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// 1-based step number.
    pub step: usize,
    /// State name the step began in.
    pub state: String,
    /// Symbol read from under the head.
    pub read: Symbol,
    /// Whether a registered rule matched (false means the identity default).
    pub matched: bool,
    /// Symbol written back under the head.
    pub write: Symbol,
    /// Movement the target prescribed, if any.
    pub direction: Option<Direction>,
    /// Head position after the move.
    pub head: i64,
    /// State name the step ended in.
    pub next_state: String,
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step-{}: {} read {:?} write {:?} {} head={} next={}",
            self.step,
            self.state,
            self.read,
            self.write,
            self.direction.map_or("-", |d| d.token()),
            self.head,
            self.next_state,
        )
    }
}

impl TuringMachine {
    /// Builds a machine from its parts: an initial tape, the initial state
    /// name, the set of final state names (a single name, many, or none),
    /// and a transition function.
    ///
    /// An empty transition function makes a no-op machine: every step
    /// rewrites the symbol it read and stays where it is.
    pub fn new<T, I, S>(
        tape: T,
        initial_state: impl Into<String>,
        final_states: I,
        transition: TransitionFn,
    ) -> Self
    where
        T: Into<Tape>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tape: tape.into(),
            head: 0,
            state: initial_state.into(),
            final_states: final_states.into_iter().map(Into::into).collect(),
            transition,
            steps: 0,
        }
    }

    /// Executes one step: read, look up, write, move, adopt the target state.
    pub fn step(&mut self) -> StepEvent {
        let read = self.tape.get(self.head);
        let query = State::new(self.state.clone()).derive_symbol(read);
        let matched = self.transition.contains(&query.key());
        let target = self.transition.lookup(&query);

        // registration validates targets, and the identity default carries
        // the symbol just read
        let write = target.symbol().unwrap_or(read);
        self.tape.put(self.head, write);
        self.head += target.delta();
        self.state = target.name().to_string();
        self.steps += 1;

        StepEvent {
            step: self.steps,
            state: query.name().to_string(),
            read,
            matched,
            write,
            direction: target.direction(),
            head: self.head,
            next_state: self.state.clone(),
        }
    }

    /// Whether the current state name is in the final set.
    pub fn is_done(&self) -> bool {
        self.final_states.contains(&self.state)
    }

    /// The symbol currently under the head. May grow the tape.
    pub fn read_head(&mut self) -> Symbol {
        self.tape.get(self.head)
    }

    /// Overwrites the symbol under the head.
    pub fn write_head(&mut self, symbol: Symbol) {
        self.tape.put(self.head, symbol);
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    /// Current head position, as a logical tape index.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Current state name.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Number of steps executed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn final_states(&self) -> &HashSet<String> {
        &self.final_states
    }
}
