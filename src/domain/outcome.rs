use super::TriggerId;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The trigger is the parent itself.
    IsParent,
    /// The trigger is owned by a discovery rule.
    Prototype,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsParent => f.write_str("is the parent trigger"),
            Self::Prototype => f.write_str("discovery rule prototype"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(tag = "type")]
pub enum Outcome {
    Created,
    Skipped { reason: SkipReason },
    Failed { reason: String },
}

impl Outcome {
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    pub fn failed(reason: &str) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub trigger_id: TriggerId,
    pub description: String,
    pub outcome: Outcome,
}

impl OperationResult {
    pub fn new(trigger_id: TriggerId, description: &str, outcome: Outcome) -> Self {
        Self {
            trigger_id,
            description: description.to_string(),
            outcome,
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Created => write!(f, "CREATED  {} {}", self.trigger_id, self.description),
            Outcome::Skipped { reason } => write!(
                f,
                "SKIPPED  {} {} ({})",
                self.trigger_id, self.description, reason
            ),
            Outcome::Failed { reason } => write!(
                f,
                "FAILED   {} {} ({})",
                self.trigger_id, self.description, reason
            ),
        }
    }
}
