//! This module defines the core data structures and types used throughout the simulator,
//! including tape symbols, machine states, transitions, step outcomes and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The blank symbol as it appears on the tape.
pub const DEFAULT_BLANK_SYMBOL: char = ' ';
/// The character used to display the blank symbol, since a space is invisible in tables and tapes.
pub const INPUT_BLANK_SYMBOL: char = '_';

/// A symbol of the tape alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "_")]
    Blank,
}

impl Symbol {
    /// All symbols of the alphabet, in table order.
    pub const ALL: [Symbol; 3] = [Symbol::Zero, Symbol::One, Symbol::Blank];

    /// The character stored on the tape for this symbol.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => DEFAULT_BLANK_SYMBOL,
        }
    }

    /// The character used when rendering this symbol, with the blank made visible.
    pub fn display_char(self) -> char {
        match self {
            Symbol::Blank => INPUT_BLANK_SYMBOL,
            symbol => symbol.as_char(),
        }
    }

    /// Returns the complementary bit. The blank has no complement and maps to itself.
    pub fn flip(self) -> Symbol {
        match self {
            Symbol::Zero => Symbol::One,
            Symbol::One => Symbol::Zero,
            Symbol::Blank => Symbol::Blank,
        }
    }

    /// Checks whether this is the blank symbol.
    pub fn is_blank(self) -> bool {
        self == Symbol::Blank
    }
}

impl TryFrom<char> for Symbol {
    type Error = char;

    /// Converts a tape character into a symbol. Both the blank and its display form are accepted.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            DEFAULT_BLANK_SYMBOL | INPUT_BLANK_SYMBOL => Ok(Symbol::Blank),
            other => Err(other),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Blank => f.write_str("blank"),
            symbol => write!(f, "{}", symbol.as_char()),
        }
    }
}

/// The control states of the machine. `Halt` is the only terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Start,
    Complement,
    Halt,
}

impl State {
    /// Checks whether execution stops in this state.
    pub fn is_terminal(self) -> bool {
        self == State::Halt
    }

    /// Returns the lowercase name used in tables and JSON.
    pub fn name(self) -> &'static str {
        match self {
            State::Start => "start",
            State::Complement => "complement",
            State::Halt => "halt",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Stay => "Stay",
        };
        f.write_str(label)
    }
}

/// A single transition rule: in `state` reading `read`, write `write`,
/// move the head in `direction` and continue in `next_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub read: Symbol,
    pub next_state: State,
    pub write: Symbol,
    pub direction: Direction,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and continues execution.
    Continue,
    /// The machine is in the terminal state.
    Halt,
}

/// Represents the errors that can occur while validating input or running the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// No rule is defined for the current state and the symbol under the head.
    #[error("No rule defined for state {state} and symbol {symbol}")]
    UndefinedTransition { state: State, symbol: Symbol },
    /// The input contains a character outside of the binary alphabet.
    #[error("Please enter a binary string containing only 0s and 1s. Found {character:?} at position {position}")]
    InvalidInput { position: usize, character: char },
    /// The transition table failed analysis.
    #[error("Transition table validation error: {0}")]
    ValidationError(String),
}
