use super::{MonitoringApi, TriggerFilter};
use crate::{
    domain::{
        Dependency, Error, Host, HostGroup, HostId, RawTrigger, RpcRequest, RpcResponse, Trigger,
        TriggerId, Unit,
    },
    service::ZabbixConfig,
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const API_VERSION: &str = "apiinfo.version";
pub const USER_LOGIN: &str = "user.login";
pub const HOST_GET: &str = "host.get";
pub const HOSTGROUP_GET: &str = "hostgroup.get";
pub const TRIGGER_GET: &str = "trigger.get";
pub const TRIGGER_ADD_DEPENDENCIES: &str = "trigger.adddependencies";

const TRIGGER_OUTPUT: [&str; 5] = ["triggerid", "description", "status", "flags", "templateid"];

/// JSON-RPC client for a Zabbix frontend's `api_jsonrpc.php`.
#[derive(Clone)]
pub struct ZabbixClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ZabbixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZabbixClient")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl TryFrom<&ZabbixConfig> for ZabbixClient {
    type Error = Error;

    fn try_from(config: &ZabbixConfig) -> Result<Self, Self::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout()))
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url().to_string(),
            token: config.api_token().map(str::to_string),
        })
    }
}

impl ZabbixClient {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Exchanges credentials for a session token. The token is not renewed.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, Error> {
        self.call(
            USER_LOGIN,
            json!({ "username": username, "password": password }),
        )
        .await
        .map_err(|e| match e {
            Error::Api { message, data, .. } => {
                Error::connection(format!("Authentication failed: {message} {data}"))
            }
            other => other,
        })
    }

    async fn call<P, T>(&self, method: &str, params: P) -> Result<T, Error>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        debug!("Calling API method: {}", method);

        let request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json-rpc");
        let request = match (requires_auth(method), &self.token) {
            (false, _) => request,
            (true, Some(token)) => request.bearer_auth(token),
            (true, None) => {
                return Err(Error::Configuration(format!(
                    "No API token available for {method}"
                )))
            }
        };

        let response = request
            .json(&RpcRequest::new(method, params))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!("HTTP request for {} failed: {}", method, e);
                Error::connection(format!("HTTP request failed: {e}"))
            })?;

        let envelope = response.json::<RpcResponse>().await.map_err(|e| {
            warn!("Invalid JSON response from {}: {}", method, e);
            Error::decode(method, format!("Invalid JSON response: {e}"))
        })?;

        if let Some(error) = envelope.error {
            return Err(Error::Api {
                method: method.to_string(),
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        let result = envelope
            .result
            .ok_or_else(|| Error::decode(method, "response has neither result nor error"))?;

        serde_json::from_value(result).map_err(|e| Error::decode(method, e))
    }
}

fn requires_auth(method: &str) -> bool {
    method != API_VERSION && method != USER_LOGIN
}

fn decode_triggers(method: &str, rows: Vec<RawTrigger>) -> Result<Vec<Trigger>, Error> {
    rows.into_iter()
        .map(|row| Trigger::try_from(row).map_err(|reason| Error::decode(method, reason)))
        .collect()
}

#[async_trait]
impl MonitoringApi for ZabbixClient {
    async fn version(&self) -> Result<String, Error> {
        self.call(API_VERSION, json!([])).await
    }

    async fn host(&self, id: &HostId) -> Result<Option<Host>, Error> {
        let hosts: Vec<Host> = self
            .call(
                HOST_GET,
                json!({ "hostids": [id], "output": ["hostid", "host", "name"] }),
            )
            .await?;

        Ok(hosts.into_iter().next())
    }

    async fn trigger(&self, id: &TriggerId) -> Result<Option<Trigger>, Error> {
        let rows: Vec<RawTrigger> = self
            .call(
                TRIGGER_GET,
                json!({
                    "triggerids": [id],
                    "output": TRIGGER_OUTPUT,
                    "selectHosts": ["hostid", "host", "name"],
                }),
            )
            .await?;

        Ok(decode_triggers(TRIGGER_GET, rows)?.into_iter().next())
    }

    async fn host_triggers(
        &self,
        id: &HostId,
        filter: TriggerFilter,
    ) -> Result<Vec<Trigger>, Error> {
        let mut params = json!({
            "hostids": [id],
            "output": TRIGGER_OUTPUT,
            "sortfield": "description",
        });
        if filter.enabled_only {
            params["filter"] = json!({ "status": 0 });
        }

        let rows: Vec<RawTrigger> = self.call(TRIGGER_GET, params).await?;
        decode_triggers(TRIGGER_GET, rows)
    }

    async fn hosts_in_group(&self, group: &str) -> Result<Vec<Host>, Error> {
        let groups: Vec<HostGroup> = self
            .call(
                HOSTGROUP_GET,
                json!({
                    "filter": { "name": [group] },
                    "output": ["name"],
                    "monitored_hosts": true,
                    "selectHosts": ["hostid", "host", "name", "status"],
                }),
            )
            .await?;

        Ok(groups
            .into_iter()
            .next()
            .map(|group| group.hosts)
            .unwrap_or_default())
    }

    async fn triggers_by_description(
        &self,
        id: &HostId,
        description: &str,
    ) -> Result<Vec<Trigger>, Error> {
        let rows: Vec<RawTrigger> = self
            .call(
                TRIGGER_GET,
                json!({
                    "hostids": [id],
                    "output": TRIGGER_OUTPUT,
                    "search": { "description": description },
                }),
            )
            .await?;

        decode_triggers(TRIGGER_GET, rows)
    }

    async fn add_dependency(&self, dependency: &Dependency) -> Result<Unit, Error> {
        let _: Value = self
            .call(
                TRIGGER_ADD_DEPENDENCIES,
                json!({
                    "triggerid": dependency.dependent(),
                    "dependsOnTriggerid": dependency.parent(),
                }),
            )
            .await?;

        Ok(())
    }
}
