// SPDX-License-Identifier: Apache-2.0

mod model;

pub use model::{Error, ExitCode, MachineError, Result};
