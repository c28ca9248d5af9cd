//! This module provides functions for analyzing transition tables to detect errors before
//! execution: an undefined start state, dangling next states, unreachable states,
//! duplicated rules and symbols a state cannot handle.
//!
//! A table that passes analysis can never fail with `UndefinedTransition`.

use crate::table::TransitionTable;
use crate::types::{State, Symbol, TuringMachineError};
use std::collections::HashSet;

/// Represents the errors that can be found during the analysis of a transition table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The initial state is not terminal but has no rules.
    InvalidStartState(State),
    /// Transitions lead into non-terminal states that have no rules.
    UndefinedNextStates(Vec<String>),
    /// States with rules that cannot be reached from the initial state.
    UnreachableStates(Vec<State>),
    /// More than one rule exists for the same state and symbol.
    AmbiguousRules(Vec<String>),
    /// Non-terminal states without a rule for some symbol of the alphabet.
    UnhandledSymbols(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::UndefinedNextStates(transitions) => TuringMachineError::ValidationError(
                format!("Transitions reference undefined states: {:?}", transitions),
            ),
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
            AnalysisError::AmbiguousRules(rules) => TuringMachineError::ValidationError(format!(
                "More than one rule for the same state and symbol: {:?}",
                rules
            )),
            AnalysisError::UnhandledSymbols(pairs) => TuringMachineError::ValidationError(
                format!("Symbols not handled by any transition: {:?}", pairs),
            ),
        }
    }
}

/// Analyzes a `TransitionTable` for structural and logical errors.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` describing the first violated check.
pub fn analyze(table: &TransitionTable) -> Result<(), TuringMachineError> {
    [
        check_valid_start_state,
        check_undefined_next_states,
        check_unreachable_states,
        check_deterministic,
        check_exhaustive,
    ]
    .iter()
    .find_map(|f| f(table).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

/// States that have at least one rule.
fn defined_states(table: &TransitionTable) -> HashSet<State> {
    table.rules().iter().map(|t| t.state).collect()
}

fn check_valid_start_state(table: &TransitionTable) -> Result<(), AnalysisError> {
    let initial = table.initial_state();
    if !initial.is_terminal() && !defined_states(table).contains(&initial) {
        return Err(AnalysisError::InvalidStartState(initial));
    }

    Ok(())
}

/// Checks that every `next_state` is either terminal or has rules of its own.
fn check_undefined_next_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let defined = defined_states(table);

    let undefined: Vec<String> = table
        .rules()
        .iter()
        .filter(|t| !t.next_state.is_terminal() && !defined.contains(&t.next_state))
        .map(|t| format!("{}[{}] -> {}", t.state, t.read, t.next_state))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedNextStates(undefined));
    }

    Ok(())
}

/// Walks the table from the initial state and reports every state with rules that is never visited.
fn check_unreachable_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let mut visited = HashSet::new();
    let mut queue = vec![table.initial_state()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        queue.extend(
            table
                .rules_for(state)
                .map(|t| t.next_state)
                .filter(|next| !visited.contains(next)),
        );
    }

    let defined = defined_states(table);
    let unreachable: Vec<State> = table
        .states()
        .into_iter()
        .filter(|state| defined.contains(state) && !visited.contains(state))
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

fn check_deterministic(table: &TransitionTable) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    let duplicates: Vec<String> = table
        .rules()
        .iter()
        .filter(|t| !seen.insert((t.state, t.read)))
        .map(|t| format!("{}[{}]", t.state, t.read))
        .collect();

    if !duplicates.is_empty() {
        return Err(AnalysisError::AmbiguousRules(duplicates));
    }

    Ok(())
}

/// Checks that every non-terminal state with rules handles the whole alphabet.
fn check_exhaustive(table: &TransitionTable) -> Result<(), AnalysisError> {
    let unhandled: Vec<String> = table
        .states()
        .into_iter()
        .filter(|state| !state.is_terminal())
        .flat_map(|state| {
            Symbol::ALL
                .into_iter()
                .filter(move |&symbol| table.get(state, symbol).is_none())
                .map(move |symbol| format!("{}[{}]", state, symbol))
        })
        .collect();

    if !unhandled.is_empty() {
        return Err(AnalysisError::UnhandledSymbols(unhandled));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Transition};

    fn rule(state: State, read: Symbol, next_state: State) -> Transition {
        Transition {
            state,
            read,
            next_state,
            write: read,
            direction: Direction::Right,
        }
    }

    fn total(state: State, next_state: State) -> Vec<Transition> {
        Symbol::ALL
            .into_iter()
            .map(|symbol| rule(state, symbol, next_state))
            .collect()
    }

    #[test]
    fn test_complement_table_is_valid() {
        assert!(analyze(&TransitionTable::complement()).is_ok());
    }

    #[test]
    fn test_invalid_start_state() {
        let table = TransitionTable::new(State::Start, total(State::Complement, State::Halt));
        assert_eq!(
            check_valid_start_state(&table),
            Err(AnalysisError::InvalidStartState(State::Start))
        );
    }

    #[test]
    fn test_halting_start_state_needs_no_rules() {
        let table = TransitionTable::new(State::Halt, Vec::new());
        assert!(analyze(&table).is_ok());
    }

    #[test]
    fn test_undefined_next_states() {
        let table = TransitionTable::new(State::Start, total(State::Start, State::Complement));

        match check_undefined_next_states(&table) {
            Err(AnalysisError::UndefinedNextStates(transitions)) => {
                assert_eq!(transitions.len(), 3);
                assert_eq!(transitions[0], "start[0] -> complement");
            }
            other => panic!("Expected UndefinedNextStates error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_states() {
        let mut rules = total(State::Start, State::Halt);
        rules.extend(total(State::Complement, State::Halt));
        let table = TransitionTable::new(State::Start, rules);

        assert_eq!(
            check_unreachable_states(&table),
            Err(AnalysisError::UnreachableStates(vec![State::Complement]))
        );
    }

    #[test]
    fn test_ambiguous_rules() {
        let mut rules = total(State::Start, State::Halt);
        rules.push(rule(State::Start, Symbol::One, State::Start));
        let table = TransitionTable::new(State::Start, rules);

        assert_eq!(
            check_deterministic(&table),
            Err(AnalysisError::AmbiguousRules(vec!["start[1]".to_string()]))
        );
    }

    #[test]
    fn test_unhandled_symbols() {
        let table = TransitionTable::new(
            State::Start,
            vec![
                rule(State::Start, Symbol::Zero, State::Start),
                rule(State::Start, Symbol::Blank, State::Halt),
            ],
        );

        assert_eq!(
            check_exhaustive(&table),
            Err(AnalysisError::UnhandledSymbols(vec!["start[1]".to_string()]))
        );
    }

    #[test]
    fn test_analysis_error_conversion() {
        let error: TuringMachineError = AnalysisError::InvalidStartState(State::Complement).into();

        match error {
            TuringMachineError::ValidationError(msg) => {
                assert!(msg.contains("Invalid start state: complement"));
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_analyze_reports_first_error() {
        // Missing the blank rule and pointing at an undefined state at once.
        let table = TransitionTable::new(
            State::Start,
            vec![rule(State::Start, Symbol::Zero, State::Complement)],
        );

        match analyze(&table) {
            Err(TuringMachineError::ValidationError(msg)) => {
                assert!(msg.contains("undefined states"), "got: {}", msg);
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
