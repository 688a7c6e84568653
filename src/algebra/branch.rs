use super::{link, MonitoringApi};
use crate::domain::{BranchReport, Error, Host, Report, SiteSkipReason, Trigger};
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const DOWN_TRIGGER: &str = "{HOST.HOST} Down";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOptions {
    /// Groups holding the dependent hosts, usually the site switches.
    pub groups: Vec<String>,
    /// Group holding the hosts every site depends on, usually its firewalls.
    pub parent_group: String,
    /// Substring that picks the availability trigger on every host.
    pub description: String,
}

impl BranchOptions {
    pub fn new(groups: Vec<String>, parent_group: impl Into<String>) -> Self {
        Self {
            groups,
            parent_group: parent_group.into(),
            description: DOWN_TRIGGER.to_string(),
        }
    }
}

/// Monitored hosts of `groups`, keyed by site. A host listed by more than one
/// group appears once.
pub async fn hosts_by_site<A>(
    api: &A,
    groups: &[String],
) -> Result<BTreeMap<String, Vec<Host>>, Error>
where
    A: MonitoringApi + ?Sized,
{
    let mut sites: BTreeMap<String, Vec<Host>> = BTreeMap::new();
    for group in groups {
        let hosts = monitored(api, group).await?;
        info!("Found {} monitored host(s) in group {}", hosts.len(), group);
        for host in hosts {
            let site = sites.entry(host.site().to_string()).or_default();
            if !site.iter().any(|known| known.id == host.id) {
                site.push(host);
            }
        }
    }

    Ok(sites)
}

async fn monitored<A>(api: &A, group: &str) -> Result<Vec<Host>, Error>
where
    A: MonitoringApi + ?Sized,
{
    let hosts = api.hosts_in_group(group).await?;
    if hosts.is_empty() {
        warn!("Host group {} is empty or does not exist", group);
    }
    Ok(hosts.into_iter().filter(Host::is_monitored).collect())
}

async fn usable_parent_triggers<A>(
    api: &A,
    parents: &[&Host],
    description: &str,
) -> Result<Vec<Trigger>, Error>
where
    A: MonitoringApi + ?Sized,
{
    let mut triggers = vec![];
    for parent in parents {
        for trigger in api.triggers_by_description(&parent.id, description).await? {
            if trigger.is_discovery() {
                warn!(
                    "Ignoring discovered trigger {} on parent host {}",
                    trigger.id, parent.name
                );
            } else {
                triggers.push(trigger);
            }
        }
    }
    Ok(triggers)
}

/// Makes the availability trigger of every monitored host in `options.groups`
/// depend on the availability triggers of its site's hosts in
/// `options.parent_group`.
///
/// A site is the host name up to the first dash. Sites without parent hosts or
/// parent triggers are recorded and skipped. Failing lookups stop the run;
/// rejected creations are recorded like in [`super::create_dependencies`].
#[tracing::instrument(skip(api, options), fields(parent_group = %options.parent_group))]
pub async fn create_branch_dependencies<A>(
    api: &A,
    options: &BranchOptions,
) -> Result<BranchReport, Error>
where
    A: MonitoringApi + ?Sized,
{
    let mut branch = BranchReport::new();

    let sites = hosts_by_site(api, &options.groups).await?;
    let parents = monitored(api, &options.parent_group).await?;
    info!(
        "Linking {} site(s) to {} parent host(s)",
        sites.len(),
        parents.len()
    );

    for (site, hosts) in &sites {
        let site_parents: Vec<&Host> = parents.iter().filter(|p| p.belongs_to(site)).collect();
        if site_parents.is_empty() {
            warn!("No parent host found for site {}", site);
            branch.skip_site(site, SiteSkipReason::NoParentHosts);
            continue;
        }

        let parent_triggers =
            usable_parent_triggers(api, &site_parents, &options.description).await?;
        if parent_triggers.is_empty() {
            warn!("No parent trigger found for site {}", site);
            branch.skip_site(site, SiteSkipReason::NoParentTriggers);
            continue;
        }

        for host in hosts {
            let triggers = api
                .triggers_by_description(&host.id, &options.description)
                .await?;
            if triggers.is_empty() {
                warn!("No trigger matching '{}' on host {}", options.description, host.name);
            }
            for parent in &parent_triggers {
                let mut report = Report::new(host.id.clone(), parent.id.clone());
                for trigger in &triggers {
                    report.record(link(api, trigger, &parent.id).await);
                }
                branch.record(report.finish());
            }
        }
    }

    let branch = branch.finish();
    info!(
        "Finished: sites skipped={} total={} succeeded={} skipped={} failed={}",
        branch.skipped_sites().len(),
        branch.total(),
        branch.succeeded(),
        branch.skipped(),
        branch.failed()
    );

    Ok(branch)
}
