use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use lexlower_cli::args::{CliArgs, ColorChoice};
use lexlower_cli::driver;
use lexlower_cli::reporter::Reporter;

fn main() -> Result<()> {
    // Installs a subscriber only when LEXLOWER_LOG or RUST_LOG is set.
    lexlower_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    let reporter = Reporter::new(args.color.enabled(std::io::stderr().is_terminal()));

    let result = driver::run(&args, &cwd)?;

    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();
    driver::print_results(&result, &reporter, &mut out, &mut err)?;
    out.flush().context("failed to flush stdout")?;

    let code = result.exit_code();
    if code != driver::EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
