use crate::domain::{Dependency, Error, Host, HostId, Trigger, TriggerId, Unit};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerFilter {
    pub enabled_only: bool,
}

/// The slice of the Zabbix API the dependency workflows talk to.
#[async_trait]
pub trait MonitoringApi: Send + Sync {
    async fn version(&self) -> Result<String, Error>;

    async fn host(&self, id: &HostId) -> Result<Option<Host>, Error>;

    async fn trigger(&self, id: &TriggerId) -> Result<Option<Trigger>, Error>;

    async fn host_triggers(&self, id: &HostId, filter: TriggerFilter)
        -> Result<Vec<Trigger>, Error>;

    /// Hosts of the named group, with their monitoring status. An unknown
    /// group has no hosts.
    async fn hosts_in_group(&self, group: &str) -> Result<Vec<Host>, Error>;

    /// Triggers on `id` whose description contains `description`.
    async fn triggers_by_description(
        &self,
        id: &HostId,
        description: &str,
    ) -> Result<Vec<Trigger>, Error>;

    async fn add_dependency(&self, dependency: &Dependency) -> Result<Unit, Error>;
}
