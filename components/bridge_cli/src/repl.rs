//! REPL (Read-Eval-Print Loop) implementation
//!
//! Each input line is an invocation: a function name followed by
//! `KEY=VALUE` arguments. Lines starting with `.` are REPL commands.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::{parse_pair, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::runner::Runner;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Function to call
    pub function: String,
    /// Arguments in input order
    pub args: Vec<(String, String)>,
}

/// Parses `name key=value ...`.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_invocation(line: &str) -> CliResult<Option<Invocation>> {
    let mut words = line.split_whitespace();
    let Some(function) = words.next() else {
        return Ok(None);
    };
    let args = words
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CliError::Usage)?;

    Ok(Some(Invocation {
        function: function.to_string(),
        args,
    }))
}

/// Run the interactive REPL
///
/// # Arguments
/// * `runner` - Context runner that executes each invocation
/// * `format` - How result pairs are printed
///
/// # Returns
/// `Ok(())` when REPL exits normally
pub fn run_repl(runner: &mut Runner, format: OutputFormat) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("luactx {} ({} mode)", env!("CARGO_PKG_VERSION"), runner.thread_mode());
    println!("Type a function name and KEY=VALUE arguments, or .help");
    println!();

    loop {
        match editor.readline("lua> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                if trimmed.starts_with('.') {
                    if handle_repl_command(trimmed, runner, format) {
                        break;
                    }
                    continue;
                }

                match parse_invocation(trimmed) {
                    Ok(Some(invocation)) => {
                        match runner.invoke(&invocation.function, &invocation.args) {
                            Ok(output) => print_output(output.render(format)),
                            Err(e) => eprintln!("Error: {}", e),
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Press Ctrl-D or type .exit to quit");
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

fn print_output(rendered: CliResult<String>) {
    match rendered {
        Ok(text) if text.is_empty() => println!("(no pairs)"),
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Handle special REPL commands. Returns true when the REPL should exit.
fn handle_repl_command(command: &str, runner: &Runner, format: OutputFormat) -> bool {
    match command {
        ".help" => {
            println!("REPL Commands:");
            println!("  .pairs    - Show the pairs from the last call");
            println!("  .error    - Show the last error message");
            println!("  .help     - Show this help message");
            println!("  .exit     - Exit the REPL");
            println!();
            println!("Anything else is a call: NAME [KEY=VALUE ...]");
        }
        ".pairs" => match runner.last_output() {
            Some(output) => print_output(output.render(format)),
            None => println!("(no results)"),
        },
        ".error" => {
            if runner.last_error().is_empty() {
                println!("(no error)");
            } else {
                println!("{}", runner.last_error());
            }
        }
        ".exit" => return true,
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
    false
}
