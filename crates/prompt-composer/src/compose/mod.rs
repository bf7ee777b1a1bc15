//! System prompt composition.
//!
//! `compose_system_prompt` is the JSON-in/JSON-out boundary consumed by
//! desktop hosts; `compose` is the typed core. Output is deterministic for a
//! given request and settings: server lists are key-ordered and modules are
//! injected in a fixed sequence (tool access, per-server capabilities, domain
//! notes, planning, progress, closing).

pub mod complexity;
pub mod domain;
pub mod modules;

use crate::config::ComposeSettings;
use crate::error::ComposeError;
use crate::model::{PromptRequest, PromptResponse};
use crate::toolmap::default_registry;

use self::modules::ids;

/// Compose a system prompt from a JSON request, using default settings.
pub fn compose_system_prompt(request_json: &str) -> Result<String, ComposeError> {
    compose_with_settings(request_json, &ComposeSettings::default())
}

/// Compose a system prompt from a JSON request with explicit settings.
pub fn compose_with_settings(
    request_json: &str,
    settings: &ComposeSettings,
) -> Result<String, ComposeError> {
    let request: PromptRequest =
        serde_json::from_str(request_json).map_err(ComposeError::Decode)?;
    if request.user_prompt.trim().is_empty() {
        return Err(ComposeError::MissingPrompt);
    }
    let response = compose(&request, settings);
    serde_json::to_string(&response).map_err(ComposeError::Encode)
}

/// Typed composition core. Total: never fails, never panics.
pub fn compose(request: &PromptRequest, settings: &ComposeSettings) -> PromptResponse {
    let registry = default_registry();
    let servers = request.mcp_config.normalized_servers();

    let mut sections: Vec<String> = Vec::new();
    let mut applied: Vec<String> = Vec::new();
    let mut recognized: Vec<String> = Vec::new();

    if !servers.is_empty() {
        let keys: Vec<&str> = servers.keys().map(String::as_str).collect();
        sections.push(format!(
            "You have access to tools from these MCP servers: {}.",
            keys.join(", ")
        ));
        applied.push(ids::TOOL_ACCESS.to_string());

        // Per-server capability guidance. Two servers resolving to the same
        // capability contribute the block once.
        for (key, desc) in &servers {
            if let Some(cap) = registry.lookup(key) {
                recognized.push(key.clone());
                if !applied.iter().any(|m| m == cap.module_id) {
                    sections.push(cap.guidance.to_string());
                    applied.push(cap.module_id.to_string());
                }
            } else if let Some(description) = desc.description.as_deref() {
                sections.push(format!("{}: {}", key, description));
                if !applied.iter().any(|m| m == ids::SERVER_NOTES) {
                    applied.push(ids::SERVER_NOTES.to_string());
                }
            } else {
                tracing::debug!("server '{}' unrecognized and undescribed; header only", key);
            }
        }
    }

    let mut supplied_hints = request.domain_hints.clone();
    supplied_hints.extend(request.session_state.domain_hints.iter().cloned());
    let hints = domain::merge_hints(
        &supplied_hints,
        domain::detect_domain_hints(&request.user_prompt),
    );
    if let Some(notes) = modules::render_domain_notes(&hints) {
        sections.push(notes);
        applied.push(ids::DOMAIN_GUIDANCE.to_string());
    }

    let assessed = complexity::assess(&request.user_prompt, &request.session_state);
    let planning = modules::planning_applies(assessed, &request.session_state);
    if planning {
        sections.push(modules::COMPLEX_TASK_PLANNING.to_string());
        applied.push(ids::PLANNING_GUIDANCE.to_string());
    }
    let progress =
        modules::progress_applies(&request.session_state, settings.progress_call_threshold);
    if progress {
        sections.push(modules::PROGRESS_MONITORING.to_string());
        applied.push(ids::PROGRESS_MONITORING.to_string());
    }

    if !servers.is_empty() {
        sections.push(modules::TOOL_USE_CLOSING.to_string());
    }

    let system_prompt = if sections.is_empty() {
        modules::BARE_ASSISTANT_PROMPT.to_string()
    } else {
        sections.join("\n\n")
    };

    tracing::info!(
        "composed prompt ({} chars, servers={}, recognized={}, modules=[{}])",
        system_prompt.chars().count(),
        servers.len(),
        recognized.len(),
        applied.join(", ")
    );

    PromptResponse {
        system_prompt,
        recognized_tools: recognized,
        applied_modules: applied,
        complexity_assessment: Some(assessed),
        planning_guidance_included: planning,
        progress_guidance_included: progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{McpConfig, McpServerDescriptor, SessionState, TaskComplexity};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn desktop_commander() -> McpServerDescriptor {
        McpServerDescriptor {
            name: Some("desktop-commander".to_string()),
            command: "npx".to_string(),
            args: vec!["@wonderwhy-er/desktop-commander@latest".to_string()],
            description: Some("Access and manipulate files on the local system".to_string()),
            auto_start: Some(false),
        }
    }

    fn request_with(
        prompt: &str,
        servers: Vec<(&str, McpServerDescriptor)>,
        state: SessionState,
    ) -> PromptRequest {
        let mut map = HashMap::new();
        for (k, v) in servers {
            map.insert(k.to_string(), v);
        }
        PromptRequest {
            user_prompt: prompt.to_string(),
            mcp_config: McpConfig { mcp_servers: map },
            session_state: state,
            domain_hints: Vec::new(),
        }
    }

    #[test]
    fn recognized_server_contributes_guidance() {
        let req = request_with(
            "Look at the package.json file and tell me about the dependencies",
            vec![("desktop-commander", desktop_commander())],
            SessionState::default(),
        );
        let resp = compose(&req, &ComposeSettings::default());
        assert_eq!(resp.recognized_tools, vec!["desktop-commander"]);
        assert!(resp.system_prompt.contains("FILE SYSTEM GUIDANCE"));
        assert!(
            resp.system_prompt
                .starts_with("You have access to tools from these MCP servers: desktop-commander.")
        );
        assert!(resp.system_prompt.ends_with(modules::TOOL_USE_CLOSING));
        assert_eq!(resp.applied_modules.first().map(String::as_str), Some("tool_access"));
    }

    #[test]
    fn unrecognized_server_with_description_gets_a_note() {
        let srv = McpServerDescriptor {
            name: None,
            command: "my-tool".to_string(),
            args: Vec::new(),
            description: Some("Queries the internal wiki".to_string()),
            auto_start: None,
        };
        let req = request_with("hello", vec![("wiki", srv)], SessionState::default());
        let resp = compose(&req, &ComposeSettings::default());
        assert!(resp.recognized_tools.is_empty());
        assert!(resp.system_prompt.contains("wiki: Queries the internal wiki"));
        assert!(resp.applied_modules.contains(&"server_notes".to_string()));
    }

    #[test]
    fn empty_config_degrades_to_bare_assistant() {
        let req = request_with("hello there", vec![], SessionState::default());
        let resp = compose(&req, &ComposeSettings::default());
        assert_eq!(resp.system_prompt, modules::BARE_ASSISTANT_PROMPT);
        assert!(resp.applied_modules.is_empty());
        assert!(resp.recognized_tools.is_empty());
    }

    #[test]
    fn complex_task_without_plan_gets_planning_guidance() {
        let state = SessionState {
            task_complexity: Some(TaskComplexity::Complex),
            ..SessionState::default()
        };
        let req = request_with(
            "reorganize everything",
            vec![("desktop-commander", desktop_commander())],
            state,
        );
        let resp = compose(&req, &ComposeSettings::default());
        assert!(resp.planning_guidance_included);
        assert!(resp.system_prompt.to_lowercase().contains("plan"));
        assert_eq!(resp.complexity_assessment, Some(TaskComplexity::Complex));
        assert!(resp.applied_modules.contains(&"planning_guidance".to_string()));
    }

    #[test]
    fn existing_plan_suppresses_planning_guidance() {
        let state = SessionState {
            task_complexity: Some(TaskComplexity::Complex),
            has_plan: true,
            ..SessionState::default()
        };
        let req = request_with("reorganize everything", vec![], state);
        let resp = compose(&req, &ComposeSettings::default());
        assert!(!resp.planning_guidance_included);
        assert!(!resp.applied_modules.contains(&"planning_guidance".to_string()));
    }

    #[test]
    fn long_session_gets_progress_monitoring() {
        let state = SessionState {
            tool_call_count: 8,
            has_plan: true,
            original_task: Some("Update configuration files".to_string()),
            ..SessionState::default()
        };
        let req = request_with(
            "Continue working on the configuration file updates",
            vec![("desktop-commander", desktop_commander())],
            state,
        );
        let resp = compose(&req, &ComposeSettings::default());
        assert!(resp.progress_guidance_included);
        assert!(resp.system_prompt.to_lowercase().contains("progress"));
    }

    #[test]
    fn structured_indicators_match_prompt_text() {
        let state = SessionState {
            tool_call_count: 2,
            ..SessionState::default()
        };
        let req = request_with("what is in this folder?", vec![], state);
        let resp = compose(&req, &ComposeSettings::default());
        assert_eq!(
            resp.progress_guidance_included,
            resp.system_prompt.contains("PROGRESS MONITORING")
        );
        assert_eq!(
            resp.planning_guidance_included,
            resp.system_prompt.contains("COMPLEX TASK PLANNING")
        );
    }

    #[test]
    fn composition_is_deterministic() {
        let state = SessionState {
            tool_call_count: 8,
            ..SessionState::default()
        };
        let req = request_with(
            "analyze the data files",
            vec![
                ("desktop-commander", desktop_commander()),
                (
                    "memory",
                    McpServerDescriptor {
                        name: None,
                        command: "npx".to_string(),
                        args: vec!["-y".to_string(), "@modelcontextprotocol/server-memory".to_string()],
                        description: None,
                        auto_start: None,
                    },
                ),
            ],
            state,
        );
        let a = compose(&req, &ComposeSettings::default());
        let b = compose(&req, &ComposeSettings::default());
        assert_eq!(a, b);
        assert_eq!(a.recognized_tools, vec!["desktop-commander", "memory"]);
    }

    #[test]
    fn json_boundary_rejects_empty_prompt() {
        let json = r#"{ "user_prompt": "   " }"#;
        let err = compose_system_prompt(json).expect_err("empty prompt must fail");
        assert!(matches!(err, ComposeError::MissingPrompt));
    }

    #[test]
    fn json_boundary_rejects_malformed_request() {
        let err = compose_system_prompt("not json").expect_err("garbage must fail");
        assert!(matches!(err, ComposeError::Decode(_)));
    }

    proptest! {
        #[test]
        fn compose_never_panics_and_encodes(
            prompt in ".{1,80}",
            count in 0u32..32,
            has_plan in proptest::bool::ANY,
        ) {
            let state = SessionState {
                tool_call_count: count,
                has_plan,
                ..SessionState::default()
            };
            let req = request_with(&prompt, vec![("desktop-commander", desktop_commander())], state);
            let json = serde_json::to_string(&req).expect("encode request");
            match compose_system_prompt(&json) {
                Ok(out) => {
                    let decoded: PromptResponse =
                        serde_json::from_str(&out).expect("response decodes");
                    prop_assert!(!decoded.system_prompt.is_empty());
                }
                Err(ComposeError::MissingPrompt) => {
                    prop_assert!(prompt.trim().is_empty());
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
