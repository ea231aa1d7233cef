//! Client facade and domain operations
//!
//! One method per server capability, each issuing a single transport call
//! through the token guard and the error-translation adapter.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use faraday_domain::constants::API_MOUNT_POINT;
use faraday_domain::{
    FaradayError, NewWorkspace, Product, Result, VersionInfo, WorkspaceUsers,
};

use crate::config::ClientConfig;
use crate::transport::{
    Invocation, Resource, RestTransport, Transport, TransportConfig, TransportError,
};

/// Session state owned by the facade
///
/// `base_url`, `tls_verify` and `timeout` are fixed at construction. The
/// token transitions absent -> present at most once, inside
/// [`FaradayClient::get_token`]; this layer never clears it.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) base_url: Option<Url>,
    pub(crate) token: Option<String>,
    pub(crate) tls_verify: bool,
    pub(crate) timeout: Duration,
}

impl Session {
    fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = match &config.base_url {
            Some(raw) => Some(join_api_mount(raw)?),
            None => None,
        };
        Ok(Self {
            base_url,
            token: config.token.clone(),
            tls_verify: !config.ignore_tls,
            timeout: config.timeout,
        })
    }
}

/// Client facade for the server API
pub struct FaradayClient {
    pub(crate) session: Session,
    pub(crate) transport: Arc<dyn Transport>,
}

impl FaradayClient {
    /// Build a facade talking to `config.base_url` through the REST
    /// transport. Registers the full resource registry; does not contact
    /// the network.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Session::from_config(&config)?;
        let transport_config = TransportConfig {
            root_url: session.base_url.clone(),
            default_params: Vec::new(),
            default_headers: default_headers(session.token.as_deref())?,
            timeout: session.timeout,
            tls_verify: session.tls_verify,
        };
        let transport = RestTransport::new(transport_config).map_err(|err| {
            FaradayError::MissingConfig(format!("failed to construct transport: {err}"))
        })?;

        Ok(Self { session, transport: Arc::new(transport) })
    }

    /// Build a facade over an injected transport (tests, alternative
    /// transport implementations).
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self { session: Session::from_config(&config)?, transport })
    }

    /// The token currently held on the session, if any.
    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    // --- error translation --------------------------------------------------

    /// Token guard: authenticated operations fail here, before any network
    /// call, when no token is configured.
    pub(crate) fn ensure_token(&self) -> Result<()> {
        if self.session.token.is_none() {
            return Err(FaradayError::MissingConfig(
                "no API token configured, authenticate first".to_string(),
            ));
        }
        Ok(())
    }

    /// Map a transport failure onto the caller-facing taxonomy. Not-found
    /// and generic client errors pass through; anything unclassified lands
    /// in `Unknown`.
    pub(crate) fn translate(err: TransportError) -> FaradayError {
        match err {
            TransportError::Auth { .. } => FaradayError::InvalidCredentials(
                "invalid credentials, please authenticate".to_string(),
            ),
            TransportError::Connection(message) => FaradayError::Connection(message),
            TransportError::NotFound { url } => FaradayError::NotFound(url),
            TransportError::Client { status, message } => {
                FaradayError::Client { status, message }
            }
            other => FaradayError::Unknown {
                kind: other.kind().to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Guarded single-call path shared by most domain operations.
    async fn call(&self, invocation: Invocation) -> Result<Value> {
        self.ensure_token()?;
        let response = self.transport.invoke(invocation).await.map_err(Self::translate)?;
        Ok(response.body)
    }

    // --- workspaces ---------------------------------------------------------

    pub async fn get_workspaces(&self) -> Result<Value> {
        self.call(Invocation::new(Resource::Workspace, "list")).await
    }

    pub async fn get_workspace(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Workspace, "get").path_arg(workspace_name)).await
    }

    /// Create a workspace. The payload carries the server's fixed defaults
    /// and the baseline user ahead of any caller-supplied users; a 409
    /// conflict is classified as a duplicated resource.
    #[instrument(skip(self, users))]
    pub async fn create_workspace(
        &self,
        name: &str,
        description: &str,
        users: Option<WorkspaceUsers>,
    ) -> Result<Value> {
        self.ensure_token()?;
        let body = to_body(&NewWorkspace::new(name, description, users))?;
        let result = self
            .transport
            .invoke(Invocation::new(Resource::Workspace, "create").body(body))
            .await;
        match result {
            Ok(response) => Ok(response.body),
            Err(TransportError::Client { status: 409, .. }) => {
                Err(FaradayError::Duplicated("workspace already exists".to_string()))
            }
            Err(err) => Err(Self::translate(err)),
        }
    }

    pub async fn delete_workspace(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Workspace, "delete").path_arg(workspace_name)).await
    }

    /// The server has no dedicated endpoint for this check; membership is
    /// computed from the workspace listing (case-sensitive exact match).
    pub async fn is_workspace_valid(&self, workspace_name: &str) -> Result<bool> {
        let workspaces = self.get_workspaces().await?;
        let found = workspaces
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|ws| ws.get("name").and_then(Value::as_str))
                    .any(|candidate| candidate == workspace_name)
            })
            .unwrap_or(false);
        Ok(found)
    }

    // --- hosts --------------------------------------------------------------

    pub async fn get_hosts(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Host, "list").path_arg(workspace_name)).await
    }

    pub async fn get_host(&self, workspace_name: &str, host_id: i64) -> Result<Value> {
        self.call(
            Invocation::new(Resource::Host, "get")
                .path_arg(workspace_name)
                .path_arg(host_id.to_string()),
        )
        .await
    }

    /// Create a host from a server-shaped parameter object; a 409 conflict
    /// is classified as a duplicated resource.
    #[instrument(skip(self, host_params))]
    pub async fn create_host(&self, workspace_name: &str, host_params: Value) -> Result<Value> {
        self.ensure_token()?;
        let result = self
            .transport
            .invoke(
                Invocation::new(Resource::Host, "create")
                    .path_arg(workspace_name)
                    .body(host_params),
            )
            .await;
        match result {
            Ok(response) => Ok(response.body),
            Err(TransportError::Client { status: 409, .. }) => {
                Err(FaradayError::Duplicated("host already exists".to_string()))
            }
            Err(err) => Err(Self::translate(err)),
        }
    }

    pub async fn delete_host(&self, workspace_name: &str, host_id: i64) -> Result<Value> {
        self.call(
            Invocation::new(Resource::Host, "delete")
                .path_arg(workspace_name)
                .path_arg(host_id.to_string()),
        )
        .await
    }

    pub async fn get_host_services(&self, workspace_name: &str, host_id: i64) -> Result<Value> {
        self.call(
            Invocation::new(Resource::Host, "get_services")
                .path_arg(workspace_name)
                .path_arg(host_id.to_string()),
        )
        .await
    }

    /// Vulnerabilities affecting one host, filtered server-side by the
    /// host's IP through the `target` query parameter.
    pub async fn get_host_vulns(&self, workspace_name: &str, host_ip: &str) -> Result<Value> {
        self.call(
            Invocation::new(Resource::Host, "get_vulns")
                .path_arg(workspace_name)
                .param("target", host_ip),
        )
        .await
    }

    // --- vulns, services, credentials ---------------------------------------

    pub async fn get_vulns(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Vuln, "list").path_arg(workspace_name)).await
    }

    pub async fn get_services(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Service, "list").path_arg(workspace_name)).await
    }

    pub async fn get_workspace_credentials(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Credential, "list").path_arg(workspace_name)).await
    }

    // --- agents -------------------------------------------------------------

    pub async fn get_workspace_agents(&self, workspace_name: &str) -> Result<Value> {
        self.call(Invocation::new(Resource::Agent, "list").path_arg(workspace_name)).await
    }

    pub async fn get_agent(&self, workspace_name: &str, agent_id: i64) -> Result<Value> {
        self.call(
            Invocation::new(Resource::Agent, "get")
                .path_arg(workspace_name)
                .path_arg(agent_id.to_string()),
        )
        .await
    }

    /// Run an agent executor, scoped to a workspace and agent id.
    #[instrument(skip(self, args))]
    pub async fn run_executor(
        &self,
        workspace_name: &str,
        agent_id: i64,
        executor_name: &str,
        args: Value,
    ) -> Result<Value> {
        let body = to_body(&faraday_domain::ExecutorRun::new(agent_id, executor_name, args))?;
        self.call(
            Invocation::new(Resource::Agent, "run")
                .path_arg(workspace_name)
                .path_arg(agent_id.to_string())
                .body(body),
        )
        .await
    }

    // --- bulk ingestion -----------------------------------------------------

    pub async fn bulk_create(&self, workspace_name: &str, data: Value) -> Result<Value> {
        self.call(
            Invocation::new(Resource::BulkCreate, "create")
                .path_arg(workspace_name)
                .body(data),
        )
        .await
    }

    // --- server info --------------------------------------------------------

    /// Fetch and parse the server version. The product letter maps `p` to
    /// pro and `c` to corp; anything else is community.
    pub async fn get_version(&self) -> Result<VersionInfo> {
        let body = self.call(Invocation::new(Resource::Config, "config")).await?;
        let raw = body.get("ver").and_then(Value::as_str).ok_or_else(|| {
            FaradayError::Unknown {
                kind: "malformed response".to_string(),
                message: "config response is missing the version field".to_string(),
            }
        })?;
        parse_version(raw).ok_or_else(|| FaradayError::Unknown {
            kind: "malformed response".to_string(),
            message: format!("unparsable version string: {raw}"),
        })
    }
}

fn join_api_mount(raw: &str) -> Result<Url> {
    let base = Url::parse(raw)
        .map_err(|err| FaradayError::MissingConfig(format!("invalid base URL {raw}: {err}")))?;
    base.join(API_MOUNT_POINT)
        .map_err(|err| FaradayError::MissingConfig(format!("invalid base URL {raw}: {err}")))
}

fn default_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Token {token}"))
            .map_err(|err| FaradayError::MissingConfig(format!("invalid token value: {err}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|err| FaradayError::Unknown {
        kind: "serialization".to_string(),
        message: err.to_string(),
    })
}

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<product>\w)?-?(?P<version>\d+\.\d+)").expect("version pattern is valid")
});

pub(crate) fn parse_version(raw: &str) -> Option<VersionInfo> {
    let captures = VERSION_PATTERN.captures(raw)?;
    let product = Product::from_code(captures.name("product").map(|m| m.as_str()));
    let version = captures.name("version")?.as_str().to_string();
    Some(VersionInfo { product, version })
}
