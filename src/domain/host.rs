use super::HostId;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Host {
    #[serde(rename = "hostid")]
    pub id: HostId,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub name: String,
    /// `"0"` monitored, `"1"` unmonitored. Only present when selected.
    #[serde(default)]
    pub status: Option<String>,
}

impl Host {
    pub fn new(id: HostId, name: &str) -> Self {
        Self {
            id,
            host: name.to_string(),
            name: name.to_string(),
            status: Some("0".to_string()),
        }
    }

    pub fn is_monitored(&self) -> bool {
        self.status.as_deref().map(str::trim) == Some("0")
    }

    /// Branch hosts are named `<site>-<role>...`; a name without a dash is its
    /// own site.
    pub fn site(&self) -> &str {
        self.name
            .split_once('-')
            .map(|(site, _)| site)
            .unwrap_or(&self.name)
    }

    pub fn belongs_to(&self, site: &str) -> bool {
        self.name
            .strip_prefix(site)
            .is_some_and(|rest| rest.starts_with('-'))
    }
}

/// `hostgroup.get` row with its hosts selected.
#[derive(Debug, Clone, Deserialize)]
pub struct HostGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<Host>,
}
