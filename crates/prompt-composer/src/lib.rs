//! System prompt composition for MCP-enabled desktop assistants.
//!
//! The crate exposes a JSON-in/JSON-out entry point,
//! [`compose_system_prompt`], matching the contract desktop hosts call over
//! IPC: a request carrying the user prompt, an `mcpServers` configuration,
//! and session state comes in; a composed system prompt with structured
//! diagnostics goes out. The `harness` module holds the fixed integration
//! scenarios run by the `compose-check` binary.

pub mod compose;
pub mod config;
pub mod error;
pub mod harness;
pub mod model;
pub mod toolmap;

pub use compose::{compose, compose_system_prompt, compose_with_settings};
pub use config::ComposeSettings;
pub use error::ComposeError;
pub use model::{
    McpConfig, McpServerDescriptor, PromptRequest, PromptResponse, SessionState, TaskComplexity,
};
