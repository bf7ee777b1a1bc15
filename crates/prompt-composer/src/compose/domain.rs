//! Domain hint detection from the user prompt.

/// Known domains in render order, each with its trigger words.
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "code", "program", "function", "class", "script", "debug", "refactor", "implement",
        ],
    ),
    (
        "filesystem",
        &[
            "file", "folder", "directory", "path", "read", "write", "save", "delete",
        ],
    ),
    (
        "analysis",
        &[
            "analyze", "data", "csv", "excel", "chart", "graph", "statistics", "trends",
        ],
    ),
    (
        "system",
        &[
            "server", "deploy", "config", "install", "setup", "service", "process",
        ],
    ),
];

/// Detect domain hints by whole-word keyword matching over the prompt.
pub fn detect_domain_hints(user_prompt: &str) -> Vec<String> {
    let words: std::collections::HashSet<String> = user_prompt
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect();
    let mut hints = Vec::new();
    for (domain, keywords) in DOMAIN_KEYWORDS {
        if keywords.iter().any(|k| words.contains(*k)) {
            hints.push((*domain).to_string());
        }
    }
    hints
}

/// Merge supplied hints with detected ones, keeping the canonical domain
/// order first and deduplicating; unknown hints follow sorted.
pub fn merge_hints(supplied: &[String], detected: Vec<String>) -> Vec<String> {
    let mut pool: std::collections::HashSet<String> = detected.into_iter().collect();
    for h in supplied {
        pool.insert(h.to_lowercase());
    }
    let mut out = Vec::new();
    for (domain, _) in DOMAIN_KEYWORDS {
        if pool.remove(*domain) {
            out.push((*domain).to_string());
        }
    }
    let mut rest: Vec<String> = pool.into_iter().collect();
    rest.sort();
    out.extend(rest);
    out
}
