//! Metadata documents for the OTA update server.
//!
//! The server speaks the hawkBit DDI API: [`hawkbit`] builds the software
//! deployment object, [`firmware`] the firmware descriptor shown to users.
pub mod firmware;
pub mod hawkbit;

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::utils::write_file;

/// Writes `document` as JSON with two-space indentation.
pub(crate) fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    write_file(path, &json)
}
