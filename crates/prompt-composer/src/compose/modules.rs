//! Guidance modules and their gating rules.

use crate::model::{SessionState, TaskComplexity};

/// Module identifiers reported in `applied_modules`, in injection order.
pub mod ids {
    pub const TOOL_ACCESS: &str = "tool_access";
    pub const SERVER_NOTES: &str = "server_notes";
    pub const DOMAIN_GUIDANCE: &str = "domain_guidance";
    pub const PLANNING_GUIDANCE: &str = "planning_guidance";
    pub const PROGRESS_MONITORING: &str = "progress_monitoring";
}

/// Planning block for substantial tasks without an existing plan.
pub const COMPLEX_TASK_PLANNING: &str = "COMPLEX TASK PLANNING:\n\
This appears to be a substantial task. Consider creating a detailed plan first \
and breaking down the work into concrete steps.";

/// Progress block for sessions with many tool calls behind them.
pub const PROGRESS_MONITORING: &str = "PROGRESS MONITORING:\n\
You've made several tool calls. Consider summarizing your progress and checking \
if you're making clear progress toward completing the task.";

/// Default prompt when nothing else applies.
pub const BARE_ASSISTANT_PROMPT: &str = "You are a helpful AI assistant.";

/// Closing line appended whenever tools are available.
pub const TOOL_USE_CLOSING: &str =
    "Use the available tools to help the user with their request.";

/// Planning guidance fires for complex tasks that do not yet have a plan.
pub fn planning_applies(assessed: TaskComplexity, state: &SessionState) -> bool {
    assessed == TaskComplexity::Complex && !state.has_plan
}

/// Progress monitoring fires strictly above the call threshold.
pub fn progress_applies(state: &SessionState, threshold: u32) -> bool {
    state.tool_call_count > threshold
}

/// One-line guidance per recognized domain hint; unknown hints get none.
pub fn domain_guidance_line(hint: &str) -> Option<&'static str> {
    match hint {
        "programming" => {
            Some("- For code changes, inspect the surrounding code first and keep edits consistent with it")
        }
        "filesystem" => {
            Some("- Confirm paths exist before writing and never overwrite files you have not read")
        }
        "analysis" => {
            Some("- State the data source and method alongside any numbers you report")
        }
        "system" => {
            Some("- Explain the effect of configuration or service changes before applying them")
        }
        _ => None,
    }
}

/// Render the DOMAIN NOTES block, or None when no hint produced a line.
pub fn render_domain_notes(hints: &[String]) -> Option<String> {
    let lines: Vec<&str> = hints
        .iter()
        .filter_map(|h| domain_guidance_line(h))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("DOMAIN NOTES:\n{}", lines.join("\n")))
}
