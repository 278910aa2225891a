//! Ready-made demo machines, assembled in code for the platform binaries to
//! run without any external program input.

use crate::machine::TuringMachine;
use crate::state::{Direction, State};
use crate::transition::TransitionFn;
use crate::types::{MachineError, BLANK};

/// Default initial state name for the demo machines.
pub const INITIAL_STATE: &str = "init";
/// Default final state name for the demo machines.
pub const FINAL_STATE: &str = "final";

/// The classic demo: scans right flipping every bit, and halts on the first
/// blank past the input.
pub fn bit_flip(input: &str) -> Result<TuringMachine, MachineError> {
    let rules = TransitionFn::from_rules([
        (
            State::with(INITIAL_STATE, '0', None),
            State::with(INITIAL_STATE, '1', Direction::Right),
        ),
        (
            State::with(INITIAL_STATE, '1', None),
            State::with(INITIAL_STATE, '0', Direction::Right),
        ),
        (
            State::with(INITIAL_STATE, BLANK, None),
            State::with(FINAL_STATE, BLANK, Direction::Stay),
        ),
    ])?;

    Ok(TuringMachine::new(
        input,
        INITIAL_STATE,
        [FINAL_STATE],
        rules,
    ))
}

/// A machine with no transition rules at all: every step rewrites the symbol
/// it just read and goes nowhere.
pub fn no_op(input: &str) -> TuringMachine {
    TuringMachine::new(input, INITIAL_STATE, [FINAL_STATE], TransitionFn::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_flip_runs_to_completion() {
        let mut machine = bit_flip("010011").unwrap();

        let mut steps = 0;
        while !machine.is_done() && steps < 50 {
            machine.step();
            steps += 1;
        }

        assert!(machine.is_done());
        assert_eq!(steps, 7);
        assert_eq!(*machine.tape(), "101100 ");
    }

    #[test]
    fn test_no_op_goes_nowhere() {
        let mut machine = no_op("010011");
        machine.step();
        machine.step();

        assert_eq!(machine.state(), INITIAL_STATE);
        assert_eq!(machine.head(), 0);
        assert_eq!(*machine.tape(), "010011");
        assert!(!machine.is_done());
    }
}
