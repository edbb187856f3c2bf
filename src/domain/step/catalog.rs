//! Static step-to-prompt catalog
//!
//! One immutable table built at first use maps every [`StepId`] to its prompt
//! template pair. Rendering is a pure lookup + placeholder substitution.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::StepId;
use crate::domain::DomainError;

/// Marker substituted with the running input text when rendering
const INPUT_PLACEHOLDER: &str = "{input}";

/// Prompt template pair for a single step
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    /// Instruction sent as the system turn
    pub instruction: &'static str,
    /// User-turn template containing exactly one input placeholder
    pub user_template: &'static str,
}

/// A template with the input substituted, ready for the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub instruction: String,
    pub user: String,
}

static STEP_PROMPTS: Lazy<HashMap<StepId, PromptTemplate>> = Lazy::new(|| {
    HashMap::from([
        (
            StepId::CleanText,
            PromptTemplate {
                instruction: "You are a text cleaning assistant. Remove extra whitespace, \
                              normalize formatting, and fix common typos. Return only the \
                              cleaned text without any markdown or explanations.",
                user_template: "Clean the following text:\n\n{input}",
            },
        ),
        (
            StepId::Summarize,
            PromptTemplate {
                instruction: "You are a summarization assistant. Create a concise summary of \
                              the input text. Return only the summary text without any \
                              markdown or explanations.",
                user_template: "Summarize the following text:\n\n{input}",
            },
        ),
        (
            StepId::ExtractKeyPoints,
            PromptTemplate {
                instruction: "You are a key points extraction assistant. Extract the main \
                              points from the input text as a simple list, one point per \
                              line. Return only the key points without any markdown \
                              formatting or explanations.",
                user_template: "Extract key points from the following text:\n\n{input}",
            },
        ),
        (
            StepId::TagCategory,
            PromptTemplate {
                instruction: "You are a categorization assistant. Assign a single category \
                              tag to the input text. Return only the category name without \
                              any markdown or explanations.",
                user_template: "Categorize the following text with a single tag:\n\n{input}",
            },
        ),
    ])
});

/// Render the prompt pair for a step against the current pipeline text
///
/// A catalog miss is unreachable for requests that passed validation; the
/// error path exists as a guard against the catalog and the step set drifting
/// apart.
pub fn render(step: StepId, input_text: &str) -> Result<RenderedPrompt, DomainError> {
    let template = STEP_PROMPTS
        .get(&step)
        .ok_or_else(|| DomainError::unknown_step(step.as_str()))?;

    Ok(RenderedPrompt {
        instruction: template.instruction.to_string(),
        user: template.user_template.replacen(INPUT_PLACEHOLDER, input_text, 1),
    })
}
