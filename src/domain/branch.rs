use super::{Dependency, Report};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SiteSkipReason {
    NoParentHosts,
    NoParentTriggers,
}

impl fmt::Display for SiteSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParentHosts => write!(f, "no monitored host in the parent group"),
            Self::NoParentTriggers => write!(f, "no usable trigger on the parent hosts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSite {
    pub site: String,
    pub reason: SiteSkipReason,
}

/// One [`Report`] per switch host and parent trigger, plus the sites that
/// were left alone.
#[derive(Debug, Clone)]
pub struct BranchReport {
    reports: Vec<Report>,
    skipped_sites: Vec<SkippedSite>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Default for BranchReport {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchReport {
    pub fn new() -> Self {
        Self {
            reports: vec![],
            skipped_sites: vec![],
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, report: Report) {
        self.reports.push(report);
    }

    pub fn skip_site(&mut self, site: &str, reason: SiteSkipReason) {
        self.skipped_sites.push(SkippedSite {
            site: site.to_string(),
            reason,
        });
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn skipped_sites(&self) -> &[SkippedSite] {
        &self.skipped_sites
    }

    pub fn started_at(&self) -> &DateTime<Utc> {
        &self.started_at
    }

    pub fn finished_at(&self) -> Option<&DateTime<Utc>> {
        self.finished_at.as_ref()
    }

    pub fn total(&self) -> usize {
        self.reports.iter().map(Report::total).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.reports.iter().map(Report::succeeded).sum()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().map(Report::skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().map(Report::failed).sum()
    }

    pub fn created(&self) -> Vec<Dependency> {
        self.reports.iter().flat_map(Report::created).collect()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BranchReportView<'a> {
    total: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    reports: &'a [Report],
    skipped_sites: &'a [SkippedSite],
    started_at: &'a DateTime<Utc>,
    finished_at: Option<&'a DateTime<Utc>>,
}

impl Serialize for BranchReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BranchReportView {
            total: self.total(),
            succeeded: self.succeeded(),
            skipped: self.skipped(),
            failed: self.failed(),
            reports: &self.reports,
            skipped_sites: &self.skipped_sites,
            started_at: &self.started_at,
            finished_at: self.finished_at.as_ref(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for BranchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(f, "{report}")?;
            writeln!(f)?;
        }
        for skipped in &self.skipped_sites {
            writeln!(f, "Site {} skipped: {}", skipped.site, skipped.reason)?;
        }
        write!(
            f,
            "sites skipped={} total={} succeeded={} skipped={} failed={}",
            self.skipped_sites.len(),
            self.total(),
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}
