//! Types for the static server capability registry.

use std::collections::HashMap;

/// Guidance contributed to the system prompt by one recognized server kind.
#[derive(Debug, Clone)]
pub struct ServerCapability {
    /// Module identifier reported in `applied_modules`.
    pub module_id: &'static str,
    /// Guidance block injected into the prompt.
    pub guidance: &'static str,
}

/// Registry of known server keys plus alias spellings.
#[derive(Debug, Default, Clone)]
pub struct CapabilityRegistry {
    pub map: HashMap<String, ServerCapability>,
    pub aliases: HashMap<String, String>,
}

impl CapabilityRegistry {
    /// Resolve a server key to its capability, if known.
    ///
    /// Lookup is case-insensitive and follows one level of alias indirection.
    pub fn lookup(&self, key: &str) -> Option<&ServerCapability> {
        let lowered = key.to_ascii_lowercase();
        let canonical = self.aliases.get(&lowered).unwrap_or(&lowered);
        self.map.get(canonical)
    }
}
