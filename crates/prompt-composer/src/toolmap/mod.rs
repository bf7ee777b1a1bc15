//! Static capability registry for known MCP servers.
//!
//! Recognition works purely from configured server keys; there is no live
//! enumeration of server tool inventories.

pub mod types;

pub use types::*;

/// Guidance block for filesystem-capable servers.
pub const FILE_SYSTEM_GUIDANCE: &str = "FILE SYSTEM GUIDANCE:\n\
- Always read files before analyzing or modifying them\n\
- Use absolute paths for reliability\n\
- Prefer read_file over execute_command for viewing file contents";

/// Guidance block for persistent-memory servers.
pub const MEMORY_GUIDANCE: &str = "MEMORY GUIDANCE:\n\
- Record durable facts and decisions as you learn them\n\
- Check stored memory before asking the user to repeat context";

/// Guidance block for web-retrieval servers.
pub const WEB_RETRIEVAL_GUIDANCE: &str = "WEB RETRIEVAL GUIDANCE:\n\
- Fetch pages only when local context is insufficient\n\
- Cite the source URL for any retrieved claim";

/// Build the default registry of known server keys.
pub fn default_registry() -> CapabilityRegistry {
    let mut reg = CapabilityRegistry::default();
    reg.map.insert(
        "desktop-commander".to_string(),
        ServerCapability {
            module_id: "filesystem_guidance",
            guidance: FILE_SYSTEM_GUIDANCE,
        },
    );
    reg.map.insert(
        "memory".to_string(),
        ServerCapability {
            module_id: "memory_guidance",
            guidance: MEMORY_GUIDANCE,
        },
    );
    reg.map.insert(
        "fetch".to_string(),
        ServerCapability {
            module_id: "web_guidance",
            guidance: WEB_RETRIEVAL_GUIDANCE,
        },
    );
    // Alias spellings seen in host configs.
    reg.aliases
        .insert("desktop_commander".to_string(), "desktop-commander".to_string());
    reg.aliases
        .insert("server-memory".to_string(), "memory".to_string());
    reg.aliases
        .insert("web-fetch".to_string(), "fetch".to_string());
    reg
}
