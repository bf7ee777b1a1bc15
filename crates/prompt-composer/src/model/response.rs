//! Response envelope returned by the composer.

use serde::{Deserialize, Serialize};

use super::TaskComplexity;

/// Composition result: the prompt text plus structured diagnostics.
///
/// `planning_guidance_included` and `progress_guidance_included` are explicit
/// indicators so callers do not have to probe the prompt text for substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub system_prompt: String,
    #[serde(default)]
    pub recognized_tools: Vec<String>,
    #[serde(default)]
    pub applied_modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_assessment: Option<TaskComplexity>,
    #[serde(default)]
    pub planning_guidance_included: bool,
    #[serde(default)]
    pub progress_guidance_included: bool,
}
