// SPDX-License-Identifier: Apache-2.0

use clap::Subcommand;
use clap_complete::Shell;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Strip separators and print the clean form
    Clean { input: String },
    /// Compute the check digit of a bare digit body
    CheckDigit { body: String },
    /// Check one or more RUTs; exits 3 if any is invalid
    Validate {
        inputs: Vec<String>,
        /// Read one RUT per line from standard input
        #[arg(long, default_value_t = false, conflicts_with = "inputs")]
        stdin: bool,
    },
    /// Print the display form (12.345.678-9)
    Format { input: String },
    /// Print body and check digit separately
    Parts { input: String },
    /// Compare two RUTs ignoring formatting; exits 3 if they differ
    Compare { left: String, right: String },
    /// Append the check digit to a body and print the display form
    Complete { body: String },
    /// Print the stored RUTs that match a search term
    Search {
        term: String,
        #[arg(required = true)]
        stored: Vec<String>,
    },
    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the CLI version
    Version,
}
