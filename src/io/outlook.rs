//! Read/write outlook JSON files.
//!
//! Outlook JSON is the portable representation of a run, meant for charting
//! front-ends and summary widgets:
//! - run params (base, floor, capacity, noise bands) and seed
//! - both series as `{date: "YYYY-MM-DD", value}` arrays
//! - change percentage and shortage verdict

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::pipeline::OutlookOutput;
use crate::error::AppError;

const TOOL_NAME: &str = "wo";

/// On-disk envelope around a single outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookFile {
    pub tool: String,
    pub outlook: OutlookOutput,
}

/// Write an outlook JSON file.
pub fn write_outlook_json(path: &Path, outlook: &OutlookOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create outlook JSON '{}': {e}", path.display())))?;

    let doc = OutlookFile {
        tool: TOOL_NAME.to_string(),
        outlook: outlook.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write outlook JSON: {e}")))?;

    Ok(())
}

/// Read an outlook JSON file.
pub fn read_outlook_json(path: &Path) -> Result<OutlookFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open outlook JSON '{}': {e}", path.display())))?;
    let doc: OutlookFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid outlook JSON: {e}")))?;
    Ok(doc)
}
