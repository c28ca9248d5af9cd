//! This crate provides the core logic for a one's complement Turing machine simulator.
//! It includes the single-tape machine, its fixed transition table, input validation
//! for the presenters and an analyzer that checks transition tables before they run.

pub mod analyzer;
pub mod input;
pub mod machine;
pub mod table;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the input helpers used by the presenters.
pub use input::{complement, parse_input};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the transition table and its shared one's complement instance.
pub use table::{TransitionTable, COMPLEMENT_TABLE};
/// Re-exports the machine's data types from the types module.
pub use types::{Direction, State, Step, Symbol, Transition, TuringMachineError};
