// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod actions;
mod commands;
mod config;
mod logging;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use rut_core::{ExitCode, MachineError};
use serde_json::json;
use std::process::ExitCode as ProcessExitCode;

use commands::Commands;
use logging::LogFlags;

pub use config::{resolve_config_path, CliConfig, ENV_RUT_CONFIG};
pub use logging::{ENV_RUT_LOG_JSON, ENV_RUT_LOG_LEVEL};

pub const CRATE_NAME: &str = "rut-cli";

const RUT_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "rut")]
#[command(version)]
#[command(about = "Clean, validate and format Chilean RUT numbers")]
#[command(help_template = RUT_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  RUT_CONFIG      Config file path override\n  RUT_LOG_LEVEL   Log verbosity override\n  RUT_LOG_JSON    Emit logs as JSON lines"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn cli_command() -> clap::Command {
    Cli::command()
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

pub(crate) struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    pub(crate) fn usage(machine: MachineError) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine,
        }
    }

    pub(crate) fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", message),
        }
    }
}

pub fn main_entry() -> ProcessExitCode {
    let mut output_mode = OutputMode {
        json: std::env::args_os().any(|arg| arg == "--json"),
    };
    match run(&mut output_mode) {
        Ok(code) => ProcessExitCode::from(code.code()),
        Err(err) => {
            emit_error(&err, output_mode.json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run(output_mode: &mut OutputMode) -> Result<ExitCode, CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(ExitCode::Success);
            }
            _ => {
                return Err(CliError::usage(
                    MachineError::usage("invalid command line arguments")
                        .with_detail("error", err.to_string()),
                ));
            }
        },
    };

    let config_path = resolve_config_path();
    if cli.print_config_paths {
        emit_config_paths(&config_path, *output_mode).map_err(CliError::internal)?;
        return Ok(ExitCode::Success);
    }

    let config = CliConfig::load(&config_path).map_err(CliError::internal)?;
    output_mode.json |= config.json;
    let log_flags = LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
    };
    logging::init_logging(log_flags, &config).map_err(CliError::internal)?;
    tracing::debug!(config = %config_path.display(), json = output_mode.json, "rut cli starting");

    let command = cli.command.ok_or_else(|| {
        CliError::usage(MachineError::usage("missing command; see --help"))
    })?;
    actions::dispatch(command, *output_mode)
}

fn emit_config_paths(config_path: &std::path::Path, output_mode: OutputMode) -> Result<(), String> {
    let payload = json!({
        "config": config_path,
        "exists": config_path.is_file(),
    });
    let text = if output_mode.json {
        serde_json::to_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    }
    .map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
        if let Some(detail) = error.machine.details.get("error") {
            eprintln!("{detail}");
        }
    }
}
