//! Classification of backend status and result codes.
//!
//! Every function here is total: codes the dashboard does not know about are
//! a normal case and pass through verbatim (descriptions) or fall back to a
//! neutral color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display color token for a status or result tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagColor {
    Red,
    Teal,
    Gray,
    Blue,
    Green,
    Purple,
    WarmGray,
}

impl TagColor {
    /// Returns the palette token, e.g. `"warm-gray"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagColor::Red => "red",
            TagColor::Teal => "teal",
            TagColor::Gray => "gray",
            TagColor::Blue => "blue",
            TagColor::Green => "green",
            TagColor::Purple => "purple",
            TagColor::WarmGray => "warm-gray",
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome codes a generation or enhancement can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationResult {
    Success,
    ErrConfigMissing,
    ErrGeneral,
    ErrConfigInvalid,
    ErrIndexInvalid,
    ErrGeneration,
    ErrSystem,
    ErrMulti,
}

impl GenerationResult {
    pub const ALL: [GenerationResult; 8] = [
        GenerationResult::Success,
        GenerationResult::ErrConfigMissing,
        GenerationResult::ErrGeneral,
        GenerationResult::ErrConfigInvalid,
        GenerationResult::ErrIndexInvalid,
        GenerationResult::ErrGeneration,
        GenerationResult::ErrSystem,
        GenerationResult::ErrMulti,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationResult::Success => "SUCCESS",
            GenerationResult::ErrConfigMissing => "ERR_CONFIG_MISSING",
            GenerationResult::ErrGeneral => "ERR_GENERAL",
            GenerationResult::ErrConfigInvalid => "ERR_CONFIG_INVALID",
            GenerationResult::ErrIndexInvalid => "ERR_INDEX_INVALID",
            GenerationResult::ErrGeneration => "ERR_GENERATION",
            GenerationResult::ErrSystem => "ERR_SYSTEM",
            GenerationResult::ErrMulti => "ERR_MULTI",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GenerationResult::Success => "Success",
            GenerationResult::ErrConfigMissing => "Missing configuration",
            GenerationResult::ErrGeneral => "General error",
            GenerationResult::ErrConfigInvalid => "Invalid configuration",
            GenerationResult::ErrIndexInvalid => "Invalid product index",
            GenerationResult::ErrGeneration => "Generation failure",
            GenerationResult::ErrSystem => "System error",
            GenerationResult::ErrMulti => "Multiple errors",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, GenerationResult::Success)
    }
}

impl FromStr for GenerationResult {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenerationResult::ALL
            .into_iter()
            .find(|result| result.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color for a generation or enhancement lifecycle status.
pub fn status_to_color(status: &str) -> TagColor {
    match status {
        "FINISHED" => TagColor::Teal,
        "FAILED" => TagColor::Red,
        _ => TagColor::Gray,
    }
}

/// Color for an event status.
pub fn event_status_to_color(status: &str) -> TagColor {
    match status {
        "FAILED" | "ERROR" => TagColor::Red,
        "IGNORED" => TagColor::Gray,
        "IN_PROGRESS" | "INITIALIZED" => TagColor::Blue,
        "SUCCESS" => TagColor::Green,
        "NEW" => TagColor::Teal,
        "PROCESSED" => TagColor::Purple,
        _ => TagColor::Gray,
    }
}

/// Color for a result code. Absent results (job still running) are muted.
pub fn result_to_color(result: Option<&str>) -> TagColor {
    match result {
        Some("SUCCESS") => TagColor::Green,
        Some(code) if code.starts_with("ERR_") => TagColor::Red,
        _ => TagColor::WarmGray,
    }
}

/// Human description of a generation or enhancement status.
pub fn status_to_description(status: &str) -> &str {
    match status {
        "NEW" => "New",
        "INITIALIZING" => "Initializing",
        "INITIALIZED" => "Initialized",
        "PENDING" => "Pending",
        "SCHEDULED" => "Scheduled",
        "GENERATING" => "In progress",
        "ENHANCING" => "Enhancing",
        "FINISHED" => "Successfully finished",
        "FAILED" => "Failed",
        other => other,
    }
}

/// Human description of an event status.
pub fn event_status_to_description(status: &str) -> &str {
    match status {
        "FAILED" => "Failed",
        "IGNORED" => "Ignored",
        "IN_PROGRESS" => "In progress",
        "SUCCESS" => "Successfully finished",
        "NEW" => "New",
        "PROCESSED" => "Processed",
        "ERROR" => "Error",
        "INITIALIZED" => "Initialized",
        other => other,
    }
}

/// Human description of a result code; `None` means the job is still running.
pub fn result_to_description(result: Option<&str>) -> &str {
    match result {
        None => "In progress",
        Some(code) => match code.parse::<GenerationResult>() {
            Ok(known) => known.description(),
            Err(()) => code,
        },
    }
}

/// A job is in progress until it either finishes or fails.
pub fn is_in_progress(status: &str) -> bool {
    !matches!(status, "FINISHED" | "FAILED")
}

pub fn is_success(status: &str) -> bool {
    status == "FINISHED"
}
