//! Task complexity assessment.

use crate::model::{SessionState, TaskComplexity};

/// Keywords whose presence marks a task as complex.
const COMPLEXITY_KEYWORDS: &[&str] = &[
    "analyze",
    "create",
    "build",
    "refactor",
    "implement",
    "comprehensive",
    "detailed",
    "strategy",
    "plan",
    "design",
];

/// Classify the task: an explicit caller assessment wins, otherwise a keyword
/// heuristic over the user prompt decides.
pub fn assess(user_prompt: &str, state: &SessionState) -> TaskComplexity {
    if let Some(explicit) = state.task_complexity {
        tracing::debug!("using caller-supplied complexity: {}", explicit);
        return explicit;
    }
    let lowered = user_prompt.to_lowercase();
    let hit = COMPLEXITY_KEYWORDS.iter().find(|k| lowered.contains(*k));
    match hit {
        Some(k) => {
            tracing::debug!("complexity keyword '{}' found; assessing complex", k);
            TaskComplexity::Complex
        }
        None => TaskComplexity::Simple,
    }
}
