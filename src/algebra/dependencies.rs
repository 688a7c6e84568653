use super::{MonitoringApi, TriggerFilter};
use crate::domain::{
    Dependency, Error, HostId, OperationResult, Outcome, Report, SkipReason, Trigger, TriggerId,
};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyOptions {
    /// Only consider triggers that are currently enabled.
    pub enabled_only: bool,
}

/// Why a trigger from the host listing must not get a dependency, if at all.
pub fn classify(trigger: &Trigger, parent_id: &TriggerId) -> Option<SkipReason> {
    if &trigger.id == parent_id {
        Some(SkipReason::IsParent)
    } else if trigger.is_discovery() {
        Some(SkipReason::Prototype)
    } else {
        None
    }
}

pub fn eligible<'a>(triggers: &'a [Trigger], parent_id: &TriggerId) -> Vec<&'a Trigger> {
    triggers
        .iter()
        .filter(|trigger| classify(trigger, parent_id).is_none())
        .collect()
}

/// Classifies `trigger` against `parent_id` and, when eligible, asks the API
/// for the edge. A rejection becomes a `Failed` result.
pub(crate) async fn link<A>(api: &A, trigger: &Trigger, parent_id: &TriggerId) -> OperationResult
where
    A: MonitoringApi + ?Sized,
{
    let outcome = match classify(trigger, parent_id) {
        Some(reason) => {
            info!("Skipping trigger {} ({}): {}", trigger.id, trigger.description, reason);
            Outcome::skipped(reason)
        }
        None => {
            let dependency = Dependency::new(trigger.id.clone(), parent_id.clone());
            match api.add_dependency(&dependency).await {
                Ok(()) => {
                    info!("Created dependency {} ({})", dependency, trigger.description);
                    Outcome::Created
                }
                Err(e) => {
                    warn!("Failed to create dependency {}: {}", dependency, e);
                    Outcome::failed(&e.reason())
                }
            }
        }
    };

    OperationResult::new(trigger.id.clone(), &trigger.description, outcome)
}

/// Makes every eligible trigger on `host_id` depend on `parent_id`.
///
/// Fails before any write when the parent is missing or owned by a discovery
/// rule, when the host is missing, or when the listing cannot be fetched.
/// Once creation starts every trigger gets an entry in the report and a
/// rejected creation never stops the run. Nothing is rolled back.
#[tracing::instrument(skip(api, options), fields(host_id = %host_id, parent_id = %parent_id))]
pub async fn create_dependencies<A>(
    api: &A,
    host_id: &HostId,
    parent_id: &TriggerId,
    options: DependencyOptions,
) -> Result<Report, Error>
where
    A: MonitoringApi + ?Sized,
{
    let mut report = Report::new(host_id.clone(), parent_id.clone());

    info!("Validating parent trigger {}", parent_id);
    let parent = api.trigger(parent_id).await?.ok_or_else(|| {
        error!("Parent trigger {} not found", parent_id);
        Error::ParentNotFound(parent_id.clone())
    })?;
    if parent.is_discovery() {
        error!(
            "Parent trigger {} ({}) is a discovery rule prototype",
            parent_id, parent.description
        );
        return Err(Error::InvalidParent(parent_id.clone()));
    }
    info!(
        "Parent trigger found: {} (inherited from template: {})",
        parent.description,
        parent.is_inherited()
    );

    info!("Validating host {}", host_id);
    let host = api
        .host(host_id)
        .await?
        .ok_or_else(|| Error::HostNotFound(host_id.clone()))?;
    info!("Host found: {} ({})", host.name, host.host);

    let filter = TriggerFilter {
        enabled_only: options.enabled_only,
    };
    let triggers = api
        .host_triggers(host_id, filter)
        .await
        .map_err(|e| match e {
            Error::Connection(_) | Error::Decode { .. } => e,
            other => Error::connection(format!(
                "Failed to list triggers for host {host_id}: {other}"
            )),
        })?;
    info!("Found {} trigger(s) on host {}", triggers.len(), host_id);

    for trigger in &triggers {
        report.record(link(api, trigger, parent_id).await);
    }

    let report = report.finish();
    info!(
        "Finished: total={} succeeded={} skipped={} failed={}",
        report.total(),
        report.succeeded(),
        report.skipped(),
        report.failed()
    );

    Ok(report)
}
