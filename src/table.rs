//! This module defines the `TransitionTable`, the immutable rule set that drives the machine,
//! together with the fixed one's complement table shared by every machine instance.

use crate::types::{Direction, State, Symbol, Transition};
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static::lazy_static! {
    /// The one's complement table, built once and shared read-only.
    pub static ref COMPLEMENT_TABLE: TransitionTable = TransitionTable::complement();
}

const TABLE_TITLE: &str = "Turing Machine Transition Table";
const TABLE_HEADERS: [&str; 5] = [
    "Current State",
    "Read Symbol",
    "New State",
    "Write Symbol",
    "Direction",
];

/// An ordered, immutable list of transitions with lookup by `(state, symbol)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    initial_state: State,
    rules: Vec<Transition>,
}

impl TransitionTable {
    /// Creates a table from an initial state and a list of rules. Rules keep their order.
    pub fn new(initial_state: State, rules: Vec<Transition>) -> Self {
        Self {
            initial_state,
            rules,
        }
    }

    /// Builds the one's complement table: flip each bit while moving right,
    /// halt without moving on the first blank.
    pub fn complement() -> Self {
        let mut rules = Vec::with_capacity(6);

        for state in [State::Start, State::Complement] {
            for read in [Symbol::Zero, Symbol::One] {
                rules.push(Transition {
                    state,
                    read,
                    next_state: State::Complement,
                    write: read.flip(),
                    direction: Direction::Right,
                });
            }

            rules.push(Transition {
                state,
                read: Symbol::Blank,
                next_state: State::Halt,
                write: Symbol::Blank,
                direction: Direction::Stay,
            });
        }

        Self::new(State::Start, rules)
    }

    /// Returns the state a machine using this table starts in.
    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    /// Finds the rule for the given state and symbol.
    pub fn get(&self, state: State, symbol: Symbol) -> Option<&Transition> {
        self.rules
            .iter()
            .find(|t| t.state == state && t.read == symbol)
    }

    /// Returns all rules in table order.
    pub fn rules(&self) -> &[Transition] {
        &self.rules
    }

    /// Returns the rules that apply in `state`.
    pub fn rules_for(&self, state: State) -> impl Iterator<Item = &Transition> {
        self.rules.iter().filter(move |t| t.state == state)
    }

    /// Returns every state mentioned by the table, starting with the initial state,
    /// in the order they are first seen.
    pub fn states(&self) -> Vec<State> {
        let mut states = vec![self.initial_state];
        for transition in &self.rules {
            for state in [transition.state, transition.next_state] {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }
        states
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the table as display rows, one cell per column.
    pub fn rows(&self) -> Vec<[String; 5]> {
        self.rules
            .iter()
            .map(|t| {
                [
                    t.state.to_string(),
                    t.read.display_char().to_string(),
                    t.next_state.to_string(),
                    t.write.display_char().to_string(),
                    t.direction.to_string(),
                ]
            })
            .collect()
    }

    /// Returns the column headers used by `rows`.
    pub fn headers() -> [&'static str; 5] {
        TABLE_HEADERS
    }
}

impl fmt::Display for TransitionTable {
    /// Renders a boxed text table with centered cells and a line between rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let widths: Vec<usize> = TABLE_HEADERS
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: char, mid: char, right: char| -> String {
            let inner = widths
                .iter()
                .map(|w| "─".repeat(w + 2))
                .collect::<Vec<_>>()
                .join(&mid.to_string());
            format!("{left}{inner}{right}")
        };
        let line = |cells: &[&str]| -> String {
            let inner = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!(" {cell:^w$} "))
                .collect::<Vec<_>>()
                .join("│");
            format!("│{inner}│")
        };

        let total_width = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        writeln!(f, "{TABLE_TITLE:^total_width$}")?;
        writeln!(f, "{}", rule('┌', '┬', '┐'))?;
        writeln!(f, "{}", line(&TABLE_HEADERS))?;
        writeln!(f, "{}", rule('├', '┼', '┤'))?;

        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            writeln!(f, "{}", line(&cells))?;
            if i + 1 < rows.len() {
                writeln!(f, "{}", rule('├', '┼', '┤'))?;
            }
        }

        write!(f, "{}", rule('└', '┴', '┘'))
    }
}
