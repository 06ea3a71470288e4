//! Actor string parsing.
//!
//! Actor values take one of three shapes: `Person: name (email)`,
//! `Organization: name (email)` or `Tool: name`. The email clause is
//! optional and may be present but empty (`name ()`), which reads as
//! "no email".

use regex::Regex;

use crate::model::{Actor, ActorType};

/// True when the value carries one of the three actor prefixes. Values
/// without a prefix are grammar-level mismatches rather than actor-parse
/// failures.
pub fn has_actor_prefix(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with("Person:") || value.starts_with("Organization:") || value.starts_with("Tool:")
}

/// Parse an actor string. On failure returns one message per defect.
pub fn parse_actor(value: &str) -> Result<Actor, Vec<String>> {
    let trimmed = value.trim();
    if let Some(rest) = trimmed.strip_prefix("Person:") {
        parse_named_actor(ActorType::Person, rest, trimmed)
    } else if let Some(rest) = trimmed.strip_prefix("Organization:") {
        parse_named_actor(ActorType::Organization, rest, trimmed)
    } else if let Some(rest) = trimmed.strip_prefix("Tool:") {
        let name = rest.trim();
        if name.is_empty() {
            return Err(vec![format!("No name for Tool provided: {}.", trimmed)]);
        }
        Ok(Actor::new(ActorType::Tool, name, None))
    } else {
        Err(vec![format!(
            "Actor must start with 'Person:', 'Organization:' or 'Tool:': {}",
            trimmed
        )])
    }
}

fn parse_named_actor(
    actor_type: ActorType,
    rest: &str,
    original: &str,
) -> Result<Actor, Vec<String>> {
    let pattern = Regex::new(r"^\s*(?P<name>.*?)\s*(?:\((?P<email>[^)]*)\))?\s*$").unwrap();
    let captures = match pattern.captures(rest) {
        Some(captures) => captures,
        None => {
            return Err(vec![format!(
                "Invalid {} value: {}.",
                actor_type.label(),
                original
            )])
        }
    };
    let name = captures.name("name").map(|m| m.as_str()).unwrap_or("");
    if name.is_empty() {
        return Err(vec![format!(
            "No name for {} provided: {}.",
            actor_type.label(),
            original
        )]);
    }
    let email = captures
        .name("email")
        .map(|m| m.as_str().trim())
        .filter(|email| !email.is_empty())
        .map(str::to_string);
    Ok(Actor::new(actor_type, name, email))
}
