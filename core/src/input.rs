use std::collections::HashMap;
use anyhow::{anyhow, Result};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// Split manual-entry arguments into a name and `key:value` metadata.
///
/// Only alphabetic keys count as metadata, so a bare clock like `9:00` stays
/// part of the name instead of becoming key `9`.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) {
                metadata.insert(key.to_lowercase(), value.trim().to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" ").trim().to_string(),
        metadata,
    }
}

/// Resolve `key` against `candidates`: exact match first, then a unique prefix.
/// Matching ignores case; the candidate's own spelling is returned.
pub fn resolve_prefix(key: &str, candidates: &[&str]) -> Result<String> {
    let needle = key.trim().to_lowercase();
    if needle.is_empty() {
        return Err(anyhow!("Empty name"));
    }

    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == needle) {
        return Ok(exact.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&needle))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown name: '{}'", key)),
        _ => Err(anyhow!("Ambiguous name: '{}' matches {:?}", key, matches)),
    }
}
