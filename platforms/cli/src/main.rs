use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use complement::{Step, TransitionTable, TuringMachine, COMPLEMENT_TABLE};
use serde::Serialize;
use std::io::{self, Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Computes the one's complement of a binary string with a Turing machine.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  complement-cli -i 1011
  echo 1011 | complement-cli --format json
  complement-cli --table-only")]
struct Cli {
    /// The binary string to complement. Read from stdin when omitted.
    #[clap(short, long)]
    input: Option<String>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only print the transition table
    #[clap(long, conflicts_with = "no_table")]
    table_only: bool,

    /// Do not print the transition table
    #[clap(long)]
    no_table: bool,

    /// Log every transition to stderr (overrides RUST_LOG)
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    output: &'a str,
    steps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<&'a TransitionTable>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = if cli.table_only {
        String::new()
    } else {
        read_input(&cli)?
    };

    execute(&cli, &input, &mut io::stdout(), &mut io::stderr())
}

/// Runs the machine on `input` and writes the report to `out`.
///
/// The step trace goes to `out` in text mode and to `diag` in JSON mode, so the
/// JSON report is the only thing on `out`.
fn execute(cli: &Cli, input: &str, out: &mut impl Write, diag: &mut impl Write) -> Result<()> {
    let table: &TransitionTable = &COMPLEMENT_TABLE;

    if cli.table_only {
        match cli.format {
            Format::Text => writeln!(out, "{}", table)?,
            Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(table)?)?,
        }
        return Ok(());
    }

    let mut machine = TuringMachine::from_input(input)?;

    if cli.format == Format::Text && !cli.no_table {
        writeln!(out, "{}\n", table)?;
    }

    let output = match (cli.debug, cli.format) {
        (true, Format::Text) => trace(&mut machine, &mut *out)?,
        (true, Format::Json) => trace(&mut machine, &mut *diag)?,
        (false, _) => machine.run()?,
    };

    match cli.format {
        Format::Text => writeln!(out, "One's Complement: {}", output)?,
        Format::Json => {
            let report = Report {
                input: input.trim(),
                output: &output,
                steps: machine.step_count(),
                table: (!cli.no_table).then_some(table),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("complement=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Takes the input from `--input`, falling back to piped stdin.
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }

    if atty::is(atty::Stream::Stdin) {
        bail!("No input given. Pass --input <BITS> or pipe a binary string on stdin.");
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Formats one trace line: step count, state, tape with the head cell in brackets, head.
fn format_state(machine: &TuringMachine) -> String {
    let tape: String = machine
        .tape()
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            if i == machine.head() {
                format!("[{}]", symbol.display_char())
            } else {
                symbol.display_char().to_string()
            }
        })
        .collect();

    format!(
        "Step: {}, State: {}, Tape: {}, Head: {}",
        machine.step_count(),
        machine.state(),
        tape,
        machine.head()
    )
}

/// Steps the machine to halt, writing the configuration before every step.
fn trace(machine: &mut TuringMachine, out: &mut impl Write) -> Result<String> {
    writeln!(out, "{}", format_state(machine))?;
    while machine.step()? == Step::Continue {
        writeln!(out, "{}", format_state(machine))?;
    }
    writeln!(out, "{}", format_state(machine))?;
    writeln!(out, "\nMachine halted.\n")?;

    Ok(machine.output())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("complement-cli").chain(args.iter().copied()))
    }

    fn execute_with(args: &[&str], input: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        execute(&cli(args), input, &mut out, &mut diag).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn test_format_state_marks_head() {
        let machine = TuringMachine::from_input("10").unwrap();
        assert_eq!(
            format_state(&machine),
            "Step: 0, State: start, Tape: [1]0_, Head: 0"
        );
    }

    #[test]
    fn test_trace_prints_every_step() {
        let mut machine = TuringMachine::from_input("10").unwrap();
        let mut out = Vec::new();

        let output = trace(&mut machine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(output, "01");
        assert!(text.contains("Step: 2, State: complement, Tape: 01[_], Head: 2"));
        assert!(text.contains("Machine halted."));
    }

    #[test]
    fn test_debug_json_output_is_valid_json() {
        let (out, diag) = execute_with(&["--debug", "--format", "json"], "10");

        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["output"], "01");
        assert_eq!(report["steps"], 3);
        assert!(diag.contains("Machine halted."));
    }

    #[test]
    fn test_debug_text_output_keeps_trace_on_stdout() {
        let (out, diag) = execute_with(&["--debug", "--no-table"], "1");

        assert!(out.contains("Step: 0, State: start"));
        assert!(out.ends_with("One's Complement: 0\n"));
        assert!(diag.is_empty());
    }

    #[test]
    fn test_table_only_json() {
        let (out, _) = execute_with(&["--table-only", "--format", "json"], "");

        let table: TransitionTable = serde_json::from_str(&out).unwrap();
        assert_eq!(table, TransitionTable::complement());
    }
}
