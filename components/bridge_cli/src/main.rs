//! Lua Call Bridge CLI
//!
//! Entry point for `luactx`. Parses CLI arguments, creates a context for
//! the script, and either performs one call or starts the REPL.

use bridge_cli::{repl, Cli, CliResult, Runner};
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

fn run(cli: Cli) -> CliResult<()> {
    let mut runner = Runner::new(cli.script.as_path(), cli.thread_mode(), cli.config())?;

    if let Some(function) = cli.call.as_deref() {
        let output = runner.invoke(function, &cli.args)?;
        let rendered = output.render(cli.format)?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    } else if cli.repl {
        repl::run_repl(&mut runner, cli.format)?;
    } else {
        println!("Script '{}' loaded.", cli.script.display());
        println!();
        println!("Usage:");
        println!("  luactx --script <FILE> --call <NAME> [KEY=VALUE ...]");
        println!("  luactx --script <FILE> --repl");
        println!();
        println!("Run 'luactx --help' for more options.");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
