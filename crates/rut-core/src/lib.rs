// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Chilean RUT (Rol Único Tributario) handling.
//!
//! A RUT travels in three shapes: whatever the user typed (`12.345.678-k`),
//! the clean form (`12345678K`) and the display form (`12.345.678-K`) that the
//! backends store. The free functions in [`engine`] move between them without
//! ever failing on user input; [`Rut`] is the checked value for code that wants
//! a reason when something is wrong.
//!
//! ```
//! use rut_core::{format_rut, validate_rut, Rut};
//!
//! assert_eq!(format_rut("123456785"), "12.345.678-5");
//! assert!(validate_rut("12.345.678-5"));
//! assert_eq!(Rut::parse("12345678-5").map(|r| r.to_string()).ok(), Some("12.345.678-5".to_string()));
//! ```

pub mod engine;
mod errors;
pub mod field;
mod rut;
pub mod search;

pub use engine::{
    calculate_check_digit, clean_rut_string, compare_ruts, complete_rut, format_rut, rut_body,
    rut_dv, validate_rut, MIN_CLEAN_LEN,
};
pub use errors::{Error, ExitCode, MachineError, Result};
pub use field::{FieldError, RutField};
pub use rut::Rut;
pub use search::{filter_ruts, rut_matches};

pub const CRATE_NAME: &str = "rut-core";
