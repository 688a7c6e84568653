mod telemetry;

pub use telemetry::*;

use crate::domain::Error;
use envconfig::Envconfig;
use std::collections::HashMap;
use std::fmt::Debug;

/// Connection settings for the Zabbix API.
#[derive(Clone, Envconfig)]
pub struct ZabbixConfig {
    #[envconfig(from = "ZABBIX_URL")]
    /// Full URL of `api_jsonrpc.php`
    url: String,
    #[envconfig(from = "ZABBIX_API_TOKEN")]
    /// API token sent as Bearer credential
    api_token: Option<String>,
    #[envconfig(from = "ZABBIX_USERNAME")]
    username: Option<String>,
    #[envconfig(from = "ZABBIX_PASSWORD")]
    password: Option<String>,
    #[envconfig(from = "ZABBIX_TIMEOUT_IN_MS", default = "30000")]
    timeout: u64,
    #[envconfig(from = "ZABBIX_VERIFY_TLS", default = "true")]
    verify_tls: bool,
}

/// How the client proves who it is.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Credentials<'a> {
    Token(&'a str),
    Login {
        username: &'a str,
        password: &'a str,
    },
}

impl Debug for ZabbixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZabbixConfig")
            .field("url", &self.url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

impl ZabbixConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// A token wins over a username/password pair.
    pub fn credentials(&self) -> Result<Credentials<'_>, Error> {
        if let Some(token) = self.api_token() {
            return Ok(Credentials::Token(token));
        }
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() => {
                Ok(Credentials::Login { username, password })
            }
            _ => Err(Error::Configuration(
                "set ZABBIX_API_TOKEN or both ZABBIX_USERNAME and ZABBIX_PASSWORD".to_string(),
            )),
        }
    }

    pub fn load() -> Result<Self, envconfig::Error> {
        // dotenv().ok() is already called in the main.rs
        ZabbixConfig::init_from_env()
    }
}

impl From<HashMap<&str, &str>> for ZabbixConfig {
    fn from(value: HashMap<&str, &str>) -> Self {
        let url = value
            .get("ZABBIX_URL")
            .unwrap_or(&"http://localhost/zabbix/api_jsonrpc.php")
            .to_string();
        let api_token = value.get("ZABBIX_API_TOKEN").map(|v| v.to_string());
        let username = value.get("ZABBIX_USERNAME").map(|v| v.to_string());
        let password = value.get("ZABBIX_PASSWORD").map(|v| v.to_string());
        let timeout = value
            .get("ZABBIX_TIMEOUT_IN_MS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30000);
        let verify_tls = value
            .get("ZABBIX_VERIFY_TLS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(true);

        Self {
            url,
            api_token,
            username,
            password,
            timeout,
            verify_tls,
        }
    }
}
