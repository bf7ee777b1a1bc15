//! Request envelope: user prompt, MCP server configuration, and session state.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level request as sent by a desktop host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub user_prompt: String,
    #[serde(default)]
    pub mcp_config: McpConfig,
    #[serde(default)]
    pub session_state: SessionState,
    /// Caller-supplied domain hints; merged with hints detected from the prompt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_hints: Vec<String>,
}

/// MCP server configuration block: `{ "mcpServers": { <key>: descriptor } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default, rename = "mcpServers")]
    pub mcp_servers: HashMap<String, McpServerDescriptor>,
}

impl McpConfig {
    /// Normalize the server map into a deterministic, key-ordered view.
    ///
    /// Hosts frequently omit the redundant `name` field inside each descriptor;
    /// it is backfilled from the map key here. A descriptor whose `name`
    /// disagrees with its key is kept under the key, which wins.
    pub fn normalized_servers(&self) -> BTreeMap<String, McpServerDescriptor> {
        let mut out = BTreeMap::new();
        for (key, desc) in &self.mcp_servers {
            let mut desc = desc.clone();
            match desc.name.as_deref() {
                None => desc.name = Some(key.clone()),
                Some(n) if n != key => {
                    tracing::warn!(
                        "server '{}' declares mismatched name '{}'; using the key",
                        key,
                        n
                    );
                    desc.name = Some(key.clone());
                }
                Some(_) => {}
            }
            out.insert(key.clone(), desc);
        }
        out
    }
}

/// Launch descriptor for one MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "autoStart",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_start: Option<bool>,
}

/// Caller-supplied interaction history for the current session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub tool_call_count: u32,
    #[serde(default)]
    pub has_plan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_complexity: Option<TaskComplexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_task: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_hints: Vec<String>,
}

/// Task complexity classification carried on the wire as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    Simple,
    Complex,
}

impl fmt::Display for TaskComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskComplexity::Simple => f.write_str("simple"),
            TaskComplexity::Complex => f.write_str("complex"),
        }
    }
}
