use super::TriggerId;
use serde::Serialize;
use std::fmt;

/// Directed edge: `dependent` is suppressed while `parent` is in problem state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    dependent: TriggerId,
    parent: TriggerId,
}

impl Dependency {
    pub fn new(dependent: TriggerId, parent: TriggerId) -> Self {
        Self { dependent, parent }
    }

    pub fn dependent(&self) -> &TriggerId {
        &self.dependent
    }

    pub fn parent(&self) -> &TriggerId {
        &self.parent
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.dependent, self.parent)
    }
}
