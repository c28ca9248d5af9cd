//! Input handling shared by the presenters: validation of binary strings and the
//! one-call entry point that runs the complement machine on them.

use crate::machine::TuringMachine;
use crate::types::{Symbol, TuringMachineError};

/// Parses a binary string into tape symbols.
///
/// Surrounding whitespace is ignored. Every other character must be `0` or `1`.
/// The empty string is valid and yields an empty tape.
///
/// # Returns
///
/// * `Ok(Vec<Symbol>)` with one symbol per input character.
/// * `Err(TuringMachineError::InvalidInput)` naming the first character that is not a bit,
///   with its position in the trimmed input.
pub fn parse_input(input: &str) -> Result<Vec<Symbol>, TuringMachineError> {
    input
        .trim()
        .chars()
        .enumerate()
        .map(|(position, character)| match character {
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            _ => Err(TuringMachineError::InvalidInput {
                position,
                character,
            }),
        })
        .collect()
}

/// Computes the one's complement of a binary string by running the machine to halt.
pub fn complement(input: &str) -> Result<String, TuringMachineError> {
    TuringMachine::from_input(input)?.run()
}
