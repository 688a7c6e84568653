mod algebra;
mod domain;
mod service;

pub use algebra::*;
pub use domain::*;
pub use service::*;

pub mod prelude {
    pub use crate::algebra::*;
    pub use crate::domain::*;
    pub use crate::service::*;
    pub use crate::Application;
}

use tracing::info;

/// A verified connection to the Zabbix API, ready to create dependencies.
#[derive(Debug)]
pub struct Application {
    client: ZabbixClient,
    version: String,
}

impl Application {
    /// Checks the API is reachable and, without an API token, logs in with the
    /// configured user. Any failure here is a [`Error::Connection`] or a
    /// configuration error; nothing has been read or written yet.
    pub async fn start(configuration: &ZabbixConfig) -> Result<Self, Error> {
        info!(
            "Starting application with configuration: {}{:#?}{}",
            "\n",
            &configuration,
            "\n"
        );
        let credentials = configuration.credentials()?;
        let client = ZabbixClient::try_from(configuration)?;

        info!("Connecting to Zabbix API at {}", client.url());
        let version = client.version().await.map_err(|e| match e {
            Error::Connection(_) => e,
            other => Error::connection(other),
        })?;
        info!("Connected to Zabbix API version {}", version);

        let client = match credentials {
            Credentials::Token(_) => client,
            Credentials::Login { username, password } => {
                info!("Logging in as {}", username);
                let token = client.login(username, password).await?;
                client.with_token(token)
            }
        };

        Ok(Self { client, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn client(&self) -> &ZabbixClient {
        &self.client
    }

    pub async fn run(
        &self,
        host_id: &HostId,
        parent_id: &TriggerId,
        options: DependencyOptions,
    ) -> Result<Report, Error> {
        create_dependencies(&self.client, host_id, parent_id, options).await
    }

    pub async fn branch(&self, options: &BranchOptions) -> Result<BranchReport, Error> {
        create_branch_dependencies(&self.client, options).await
    }
}
