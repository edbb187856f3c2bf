//! Workflow step identifiers and the prompt catalog

mod catalog;

pub use catalog::{render, PromptTemplate, RenderedPrompt};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a text transformation step
///
/// The set of steps is closed and fixed at compile time; requests referencing
/// anything else are rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    CleanText,
    Summarize,
    ExtractKeyPoints,
    TagCategory,
}

impl StepId {
    /// All recognized steps, in catalog order
    pub const ALL: [StepId; 4] = [
        StepId::CleanText,
        StepId::Summarize,
        StepId::ExtractKeyPoints,
        StepId::TagCategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::CleanText => "clean_text",
            StepId::Summarize => "summarize",
            StepId::ExtractKeyPoints => "extract_key_points",
            StepId::TagCategory => "tag_category",
        }
    }

    /// Parse a wire-format step name, returning `None` for unrecognized names
    pub fn parse(value: &str) -> Option<StepId> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
