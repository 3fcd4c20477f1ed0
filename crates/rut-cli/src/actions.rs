// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use clap_complete::{generate, Generator};
use rut_core::{
    calculate_check_digit, clean_rut_string, compare_ruts, filter_ruts, format_rut, rut_body,
    rut_dv, ExitCode, MachineError, Rut,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::commands::Commands;
use crate::{CliError, OutputMode};

pub(crate) fn dispatch(command: Commands, output_mode: OutputMode) -> Result<ExitCode, CliError> {
    match command {
        Commands::Clean { input } => {
            debug!(command = "clean", "running");
            let clean = clean_rut_string(&input);
            emit(
                output_mode,
                &json!({"command": "clean", "input": input, "clean": clean}),
                &clean,
            )
        }
        Commands::CheckDigit { body } => check_digit(&body, output_mode),
        Commands::Validate { inputs, stdin } => {
            if stdin {
                let lines = read_stdin_lines()?;
                if lines.is_empty() {
                    return Err(CliError::usage(MachineError::usage(
                        "--stdin given but standard input held no RUTs",
                    )));
                }
                validate(&lines, output_mode)
            } else {
                validate(&inputs, output_mode)
            }
        }
        Commands::Format { input } => {
            debug!(command = "format", "running");
            let formatted = format_rut(&input);
            emit(
                output_mode,
                &json!({"command": "format", "input": input, "formatted": formatted}),
                &formatted,
            )
        }
        Commands::Parts { input } => {
            debug!(command = "parts", "running");
            let body = rut_body(&input);
            let dv = rut_dv(&input);
            emit(
                output_mode,
                &json!({"command": "parts", "input": input, "body": body, "dv": dv}),
                &format!("body\t{body}\ndv\t{dv}"),
            )
        }
        Commands::Compare { left, right } => compare(&left, &right, output_mode),
        Commands::Complete { body } => complete(&body, output_mode),
        Commands::Search { term, stored } => {
            debug!(command = "search", candidates = stored.len(), "running");
            let matches = filter_ruts(stored.iter().map(String::as_str), &term);
            emit(
                output_mode,
                &json!({"command": "search", "term": term, "matches": matches}),
                &matches.join("\n"),
            )
        }
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(ExitCode::Success)
        }
        Commands::Version => emit(
            output_mode,
            &json!({"name": "rut", "version": env!("CARGO_PKG_VERSION")}),
            &format!("rut {}", env!("CARGO_PKG_VERSION")),
        ),
    }
}

fn check_digit(body: &str, output_mode: OutputMode) -> Result<ExitCode, CliError> {
    debug!(command = "check-digit", "running");
    let dv = calculate_check_digit(body).map_err(|err| {
        CliError::usage(
            MachineError::from(&err).with_detail("hint", "pass the body digits only, e.g. 12345678"),
        )
    })?;
    emit(
        output_mode,
        &json!({"command": "check-digit", "body": body, "dv": dv.to_string()}),
        &dv.to_string(),
    )
}

fn validate(inputs: &[String], output_mode: OutputMode) -> Result<ExitCode, CliError> {
    if inputs.is_empty() {
        return Err(CliError::usage(MachineError::usage(
            "validate needs at least one RUT or --stdin",
        )));
    }
    debug!(command = "validate", count = inputs.len(), "running");

    let mut rows = Vec::with_capacity(inputs.len());
    let mut lines = Vec::with_capacity(inputs.len());
    let mut all_valid = true;
    for input in inputs {
        match Rut::parse(input) {
            Ok(rut) => {
                lines.push(format!("{input}\tvalid\t{rut}"));
                rows.push(json!({"input": input, "valid": true, "formatted": rut.to_string()}));
            }
            Err(err) => {
                warn!(input = %input, code = err.code(), "invalid rut");
                all_valid = false;
                lines.push(format!("{input}\tinvalid\t{err}"));
                rows.push(json!({
                    "input": input,
                    "valid": false,
                    "error": MachineError::from(&err),
                }));
            }
        }
    }

    emit(
        output_mode,
        &json!({"command": "validate", "valid": all_valid, "results": rows}),
        &lines.join("\n"),
    )?;
    Ok(if all_valid {
        ExitCode::Success
    } else {
        ExitCode::Validation
    })
}

fn compare(left: &str, right: &str, output_mode: OutputMode) -> Result<ExitCode, CliError> {
    debug!(command = "compare", "running");
    let equal = compare_ruts(left, right);
    emit(
        output_mode,
        &json!({"command": "compare", "left": left, "right": right, "equal": equal}),
        if equal { "equal" } else { "different" },
    )?;
    Ok(if equal {
        ExitCode::Success
    } else {
        ExitCode::Validation
    })
}

fn complete(body: &str, output_mode: OutputMode) -> Result<ExitCode, CliError> {
    debug!(command = "complete", "running");
    let rut = Rut::from_body(body).map_err(|err| CliError::usage(MachineError::from(&err)))?;
    emit(
        output_mode,
        &json!({
            "command": "complete",
            "body": rut.body(),
            "dv": rut.check_digit().to_string(),
            "formatted": rut.to_string(),
        }),
        &rut.to_string(),
    )
}

fn read_stdin_lines() -> Result<Vec<String>, CliError> {
    let stdin = std::io::stdin();
    let mut inputs = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| CliError::internal(format!("failed to read stdin: {e}")))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            inputs.push(trimmed.to_string());
        }
    }
    Ok(inputs)
}

fn emit(output_mode: OutputMode, payload: &Value, human: &str) -> Result<ExitCode, CliError> {
    if output_mode.json {
        let text = serde_json::to_string(payload)
            .map_err(|e| CliError::internal(format!("failed to encode output: {e}")))?;
        println!("{text}");
    } else if !human.is_empty() {
        println!("{human}");
    }
    Ok(ExitCode::Success)
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = crate::cli_command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}
