//! stp2stl CLI - STEP to STL conversion
//!
//! Parses arguments into [`stp2stl::ConversionOptions`], runs the
//! conversion and maps the result onto the process exit code: 0 on
//! success, 2 for usage errors, otherwise the conversion status code.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::{debug, info};

mod args;

use args::{Cli, EarlyExit};

const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    match args::early_exit(std::env::args_os().skip(1)) {
        Some(EarlyExit::Help) => {
            let _ = Cli::command().print_help();
            return ExitCode::SUCCESS;
        }
        Some(EarlyExit::Version) => {
            println!("{}", stp2stl::version());
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        let _ = Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "both <INPUT> and <OUTPUT> are required",
            )
            .print();
        return ExitCode::from(USAGE_ERROR);
    };

    // The library takes UTF-8 paths only.
    let (Some(input), Some(output)) = (input.to_str(), output.to_str()) else {
        eprintln!("Invalid path encoding (path arguments must be valid UTF-8)");
        return ExitCode::from(USAGE_ERROR);
    };

    let options = match cli.options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Invalid argument: {e:#}");
            return ExitCode::from(USAGE_ERROR);
        }
    };
    debug!("options: {options:?}");

    match stp2stl::convert(input, output, &options) {
        Ok(()) => {
            info!("wrote {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = e.status().as_i32();
            eprintln!("Conversion failed ({code}): {}", stp2stl::last_error());
            ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
        }
    }
}
