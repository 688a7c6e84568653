use super::{Host, TriggerId};
use serde::Deserialize;

/// Where a trigger comes from, decoded from the Zabbix `flags` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOrigin {
    /// Created by hand or inherited from a template.
    Plain,
    /// A trigger prototype belonging to a low-level discovery rule.
    Prototype,
    /// Generated on the host by a discovery rule.
    Discovered,
}

impl TriggerOrigin {
    pub fn from_flags(flags: &str) -> Option<Self> {
        match flags.trim() {
            "0" => Some(Self::Plain),
            "2" => Some(Self::Prototype),
            "4" => Some(Self::Discovered),
            _ => None,
        }
    }

    /// Zabbix refuses dependencies on anything a discovery rule owns.
    pub fn is_discovery(&self) -> bool {
        !matches!(self, Self::Plain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub id: TriggerId,
    pub description: String,
    pub origin: TriggerOrigin,
    pub template_id: Option<TriggerId>,
    pub enabled: bool,
    pub hosts: Vec<Host>,
}

impl Trigger {
    pub fn new(id: TriggerId, description: impl Into<String>, origin: TriggerOrigin) -> Self {
        Self {
            id,
            description: description.into(),
            origin,
            template_id: None,
            enabled: true,
            hosts: vec![],
        }
    }

    pub fn is_discovery(&self) -> bool {
        self.origin.is_discovery()
    }

    pub fn is_inherited(&self) -> bool {
        self.template_id.is_some()
    }
}

/// `trigger.get` row as returned by the API. Every field the listing asks for
/// is mandatory except the ones only some calls select.
#[derive(Debug, Deserialize)]
pub struct RawTrigger {
    triggerid: TriggerId,
    #[serde(default)]
    description: String,
    flags: Option<String>,
    #[serde(default)]
    templateid: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    hosts: Vec<Host>,
}

impl TryFrom<RawTrigger> for Trigger {
    type Error = String;

    fn try_from(raw: RawTrigger) -> Result<Self, Self::Error> {
        let flags = raw
            .flags
            .ok_or_else(|| format!("trigger {} has no flags field", raw.triggerid))?;
        let origin = TriggerOrigin::from_flags(&flags)
            .ok_or_else(|| format!("trigger {} has unknown flags '{}'", raw.triggerid, flags))?;
        let template_id = raw
            .templateid
            .filter(|id| id.trim() != "0" && !id.trim().is_empty())
            .map(|id| id.parse::<TriggerId>())
            .transpose()?;
        let enabled = raw.status.as_deref().map(str::trim) != Some("1");

        Ok(Self {
            id: raw.triggerid,
            description: raw.description,
            origin,
            template_id,
            enabled,
            hosts: raw.hosts,
        })
    }
}
