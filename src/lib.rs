//! This crate provides the core logic for a Turing machine execution
//! environment: an unbounded, auto-extending two-way tape, a state and
//! transition-function model, and a synchronous stepping engine, plus a
//! framed text encoding for persisting state tables onto tapes.

pub mod encoder;
pub mod machine;
pub mod programs;
pub mod state;
pub mod tape;
pub mod transition;
pub mod types;

/// Re-exports the encoding functions and types from the encoder module.
pub use encoder::{decode, encode, EncodeError, Encoded};
/// Re-exports the `TuringMachine` struct and per-step events from the machine module.
pub use machine::{StepEvent, TuringMachine};
/// Re-exports the control-state types from the state module.
pub use state::{Direction, State, StateKey};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the `TransitionFn` struct from the transition module.
pub use transition::TransitionFn;
/// Re-exports the alphabet constants and error type from the types module.
pub use types::{MachineError, Symbol, BLANK};
