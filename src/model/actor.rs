//! Actors: the people, organizations and tools behind a document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of party an [`Actor`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorType {
    Person,
    Organization,
    Tool,
}

impl ActorType {
    /// The prefix this actor kind carries in serialized actor strings.
    pub fn label(self) -> &'static str {
        match self {
            ActorType::Person => "Person",
            ActorType::Organization => "Organization",
            ActorType::Tool => "Tool",
        }
    }
}

/// A creator, supplier, originator or annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub actor_type: ActorType,
    pub name: String,
    pub email: Option<String>,
}

impl Actor {
    pub fn new(actor_type: ActorType, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            actor_type,
            name: name.into(),
            email,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{}: {} ({})", self.actor_type.label(), self.name, email),
            None => write!(f, "{}: {}", self.actor_type.label(), self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_display() {
        let actor = Actor::new(ActorType::Person, "Jane Doe", Some("jane@example.com".into()));
        assert_eq!(actor.to_string(), "Person: Jane Doe (jane@example.com)");

        let tool = Actor::new(ActorType::Tool, "sbomnom-0.1", None);
        assert_eq!(tool.to_string(), "Tool: sbomnom-0.1");
    }
}
