use super::{Dependency, HostId, OperationResult, Outcome, TriggerId};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Everything that happened to every trigger of one run, in listing order.
#[derive(Debug, Clone)]
pub struct Report {
    host_id: HostId,
    parent_id: TriggerId,
    results: Vec<OperationResult>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(host_id: HostId, parent_id: TriggerId) -> Self {
        Self {
            host_id,
            parent_id,
            results: vec![],
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, result: OperationResult) {
        self.results.push(result);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn host_id(&self) -> &HostId {
        &self.host_id
    }

    pub fn parent_id(&self) -> &TriggerId {
        &self.parent_id
    }

    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    pub fn started_at(&self) -> &DateTime<Utc> {
        &self.started_at
    }

    pub fn finished_at(&self) -> Option<&DateTime<Utc>> {
        self.finished_at.as_ref()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Created))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed { .. }))
    }

    /// Edges that were actually created during the run.
    pub fn created(&self) -> Vec<Dependency> {
        self.results
            .iter()
            .filter(|result| matches!(result.outcome, Outcome::Created))
            .map(|result| Dependency::new(result.trigger_id.clone(), self.parent_id.clone()))
            .collect()
    }

    pub fn outcome_of(&self, trigger_id: &TriggerId) -> Option<&Outcome> {
        self.results
            .iter()
            .find(|result| &result.trigger_id == trigger_id)
            .map(|result| &result.outcome)
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.results
            .iter()
            .filter(|result| predicate(&result.outcome))
            .count()
    }
}

/// Serialized shape of a [`Report`], with the tallies spelled out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView<'a> {
    host_id: &'a HostId,
    parent_id: &'a TriggerId,
    total: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    results: &'a [OperationResult],
    started_at: &'a DateTime<Utc>,
    finished_at: Option<&'a DateTime<Utc>>,
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ReportView {
            host_id: &self.host_id,
            parent_id: &self.parent_id,
            total: self.total(),
            succeeded: self.succeeded(),
            skipped: self.skipped(),
            failed: self.failed(),
            results: &self.results,
            started_at: &self.started_at,
            finished_at: self.finished_at.as_ref(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dependencies on trigger {} for host {}",
            self.parent_id, self.host_id
        )?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        write!(
            f,
            "total={} succeeded={} skipped={} failed={}",
            self.total(),
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}
