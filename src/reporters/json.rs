//! JSON reporter
//!
//! Outputs the full verdict as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use anyhow::Result;
use serde::Serialize;

/// Render any verdict as JSON
pub fn render<T: Serialize>(verdict: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(verdict)?)
}
