//! This module defines the `TuringMachine` struct, which simulates a single-tape Turing machine.
//! It owns the tape, the head position and the current state, and rewrites the tape one
//! transition at a time using an immutable `TransitionTable`.

use crate::input::parse_input;
use crate::table::{TransitionTable, COMPLEMENT_TABLE};
use crate::types::{Direction, State, Step, Symbol, Transition, TuringMachineError};
use tracing::{debug, info, warn};

/// Represents a single-tape Turing machine.
///
/// The machine is created with an initial tape and starts in the table's initial state
/// with the head on the first cell. It is mutated only by `step` and `reset`.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    state: State,
    tape: Vec<Symbol>,
    head: usize,
    table: TransitionTable,
    initial_tape: Vec<Symbol>,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a machine running the one's complement table on `tape`.
    pub fn new(tape: Vec<Symbol>) -> Self {
        Self::with_table(COMPLEMENT_TABLE.clone(), tape)
    }

    /// Creates a machine running an arbitrary table on `tape`.
    pub fn with_table(table: TransitionTable, tape: Vec<Symbol>) -> Self {
        Self {
            state: table.initial_state(),
            initial_tape: tape.clone(),
            tape,
            head: 0,
            table,
            step_count: 0,
        }
    }

    /// Validates a binary string and creates a machine for it.
    ///
    /// One blank is appended after the input so the head always has a cell to halt on.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` if the input only contains `0` and `1`.
    /// * `Err(TuringMachineError::InvalidInput)` for the first offending character.
    pub fn from_input(input: &str) -> Result<Self, TuringMachineError> {
        let mut tape = parse_input(input)?;
        tape.push(Symbol::Blank);
        Ok(Self::new(tape))
    }

    /// Executes a single step of the computation.
    ///
    /// Reads the symbol under the head, writes the mapped symbol, moves the head and
    /// switches to the next state. The tape grows by one blank whenever the head moves
    /// past either end.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the machine can keep running.
    /// * `Ok(Step::Halt)` if the machine is, or just entered, the terminal state.
    /// * `Err(TuringMachineError::UndefinedTransition)` if no rule matches.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        if self.is_halted() {
            return Ok(Step::Halt);
        }

        // A read never goes past the right end of the tape.
        if self.head >= self.tape.len() {
            self.tape.resize(self.head + 1, Symbol::Blank);
        }

        let symbol = self.tape[self.head];
        let transition = match self.table.get(self.state, symbol) {
            Some(t) => *t,
            None => {
                warn!(state = %self.state, %symbol, head = self.head, "undefined transition");
                return Err(TuringMachineError::UndefinedTransition {
                    state: self.state,
                    symbol,
                });
            }
        };

        debug!(
            step = self.step_count + 1,
            state = %self.state,
            read = %symbol,
            write = %transition.write,
            next = %transition.next_state,
            head = self.head,
            "applying transition"
        );

        self.tape[self.head] = transition.write;
        self.state = transition.next_state;

        match transition.direction {
            Direction::Left => {
                if self.head == 0 {
                    // Extend tape to the left
                    self.tape.insert(0, Symbol::Blank);
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head >= self.tape.len() {
                    self.tape.push(Symbol::Blank);
                }
            }
            Direction::Stay => {}
        }

        self.step_count += 1;

        if self.is_halted() {
            info!(steps = self.step_count, "machine halted");
            Ok(Step::Halt)
        } else {
            Ok(Step::Continue)
        }
    }

    /// Runs the machine until it halts and returns the tape with surrounding blanks trimmed.
    ///
    /// Errors from `step` are returned unchanged.
    pub fn run(&mut self) -> Result<String, TuringMachineError> {
        while self.step()? == Step::Continue {}
        Ok(self.output())
    }

    /// Restores the initial tape, head position and state.
    pub fn reset(&mut self) {
        self.state = self.table.initial_state();
        self.tape = self.initial_tape.clone();
        self.head = 0;
        self.step_count = 0;
    }

    /// Returns the current contents of the tape as text, without leading or trailing blanks.
    pub fn output(&self) -> String {
        let start = self
            .tape
            .iter()
            .position(|s| !s.is_blank())
            .unwrap_or(self.tape.len());
        let end = self
            .tape
            .iter()
            .rposition(|s| !s.is_blank())
            .map_or(start, |i| i + 1);

        self.tape[start..end].iter().map(|s| s.as_char()).collect()
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the tape cells.
    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    /// Returns the head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the symbol under the head. Beyond the end of the tape this is the blank.
    pub fn symbol(&self) -> Symbol {
        self.tape.get(self.head).copied().unwrap_or(Symbol::Blank)
    }

    /// Returns the rule the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        if self.is_halted() {
            return None;
        }
        self.table.get(self.state, self.symbol())
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks if the machine is in the terminal state.
    pub fn is_halted(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the table driving this machine.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn tape(s: &str) -> Vec<Symbol> {
        s.chars().map(|c| Symbol::try_from(c).unwrap()).collect()
    }

    #[test]
    fn test_machine_creation() {
        let machine = TuringMachine::from_input("10").unwrap();

        assert_eq!(machine.state(), State::Start);
        assert_eq!(machine.tape(), tape("10_").as_slice());
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_single_step() {
        let mut machine = TuringMachine::from_input("10").unwrap();

        let result = machine.step();

        assert_eq!(result, Ok(Step::Continue));
        assert_eq!(machine.state(), State::Complement);
        assert_eq!(machine.tape(), tape("00_").as_slice());
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.step_count(), 1);
    }

    #[test_case("", ""; "empty")]
    #[test_case("0", "1"; "single zero")]
    #[test_case("1", "0"; "single one")]
    #[test_case("101", "010"; "alternating")]
    #[test_case("1111", "0000"; "all ones")]
    #[test_case("0000", "1111"; "all zeros")]
    fn test_run(input: &str, expected: &str) {
        let mut machine = TuringMachine::from_input(input).unwrap();
        assert_eq!(machine.run().unwrap(), expected);
        assert_eq!(machine.step_count(), input.len() + 1);
        assert!(machine.is_halted());
    }

    #[test]
    fn test_empty_tape_extends_before_read() {
        let mut machine = TuringMachine::new(Vec::new());

        assert_eq!(machine.symbol(), Symbol::Blank);
        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.tape(), &[Symbol::Blank]);
        assert_eq!(machine.run().unwrap(), "");
    }

    #[test]
    fn test_tape_grows_past_right_end() {
        let mut machine = TuringMachine::new(tape("01"));

        machine.step().unwrap();
        machine.step().unwrap();

        assert_eq!(machine.head(), 2);
        assert_eq!(machine.tape(), tape("10_").as_slice());
        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.output(), "10");
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut machine = TuringMachine::from_input("1").unwrap();
        machine.run().unwrap();
        let count = machine.step_count();

        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.step_count(), count);
        assert!(machine.transition().is_none());
    }

    #[test]
    fn test_undefined_transition() {
        let table = TransitionTable::new(
            State::Start,
            vec![Transition {
                state: State::Start,
                read: Symbol::Zero,
                next_state: State::Complement,
                write: Symbol::One,
                direction: Direction::Right,
            }],
        );
        let mut machine = TuringMachine::with_table(table, tape("00"));

        assert_eq!(machine.step(), Ok(Step::Continue));
        assert_eq!(
            machine.run(),
            Err(TuringMachineError::UndefinedTransition {
                state: State::Complement,
                symbol: Symbol::Zero,
            })
        );
    }

    #[test]
    fn test_left_move_extends_tape_at_front() {
        let table = TransitionTable::new(
            State::Start,
            vec![Transition {
                state: State::Start,
                read: Symbol::One,
                next_state: State::Halt,
                write: Symbol::Zero,
                direction: Direction::Left,
            }],
        );
        let mut machine = TuringMachine::with_table(table, tape("1"));

        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape(), tape("_0").as_slice());
        assert_eq!(machine.output(), "0");
    }

    #[test]
    fn test_output_trims_blanks_on_both_ends() {
        let machine = TuringMachine::new(tape("__0_1__"));
        assert_eq!(machine.output(), "0 1");

        let machine = TuringMachine::new(tape("___"));
        assert_eq!(machine.output(), "");
    }

    #[test]
    fn test_transition_preview() {
        let machine = TuringMachine::from_input("1").unwrap();
        let next = machine.transition().unwrap();

        assert_eq!(next.state, State::Start);
        assert_eq!(next.read, Symbol::One);
        assert_eq!(next.write, Symbol::Zero);
    }

    #[test]
    fn test_reset() {
        let mut machine = TuringMachine::from_input("110").unwrap();
        machine.run().unwrap();

        machine.reset();

        assert_eq!(machine.state(), State::Start);
        assert_eq!(machine.tape(), tape("110_").as_slice());
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.run().unwrap(), "001");
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let result = TuringMachine::from_input("10a1");
        assert_eq!(
            result.unwrap_err(),
            TuringMachineError::InvalidInput {
                position: 2,
                character: 'a',
            }
        );
    }
}
