//! reqwest-backed transport
//!
//! Owns the shared HTTP client, the API root and the resource registry.
//! Every invocation issues exactly one request; failures are mapped onto
//! [`TransportError`] from the response status.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

use super::resources::{Resource, ResourceDescriptor};
use super::{ApiResponse, Invocation, Transport, TransportError};

/// Configuration for the REST transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API root, already including the server's API mount point. When
    /// absent, every invocation fails with a connection-class error.
    pub root_url: Option<Url>,
    /// Query parameters appended to every request.
    pub default_params: Vec<(String, String)>,
    /// Headers applied to every request (authorization included).
    pub default_headers: HeaderMap,
    /// Uniform request timeout.
    pub timeout: Duration,
    /// Verify the server's TLS certificate.
    pub tls_verify: bool,
}

/// REST transport bound to the server's resource registry
pub struct RestTransport {
    http: HttpClient,
    root_url: Option<Url>,
    default_params: Vec<(String, String)>,
    registry: HashMap<&'static str, ResourceDescriptor>,
}

impl RestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .default_headers(config.default_headers)
            .user_agent(format!("faraday-client/{}", env!("CARGO_PKG_VERSION")))
            .accept_invalid_certs(!config.tls_verify)
            .build()?;

        let mut transport = Self {
            http,
            root_url: config.root_url,
            default_params: config.default_params,
            registry: HashMap::new(),
        };
        for resource in Resource::ALL {
            transport.add_resource(resource);
        }
        Ok(transport)
    }

    /// Register one resource descriptor. All nine are registered during
    /// construction; nothing registers later.
    fn add_resource(&mut self, resource: Resource) {
        let descriptor = resource.descriptor();
        self.registry.insert(descriptor.name, descriptor);
    }

    /// Resolve an operation template into a full endpoint URL, filling
    /// `{}` placeholders with percent-encoded path arguments.
    fn endpoint(&self, template: &str, path_args: &[String]) -> Result<Url, TransportError> {
        let root = self.root_url.as_ref().ok_or_else(|| {
            TransportError::Connection("no API base URL configured".to_string())
        })?;

        let placeholders = template.matches("{}").count();
        if placeholders != path_args.len() {
            return Err(TransportError::Invalid(format!(
                "operation template {template} expects {placeholders} path arguments, got {}",
                path_args.len()
            )));
        }

        let mut path = String::new();
        let mut args = path_args.iter();
        let mut parts = template.split("{}");
        if let Some(first) = parts.next() {
            path.push_str(first);
        }
        for part in parts {
            if let Some(arg) = args.next() {
                path.push_str(&urlencoding::encode(arg));
            }
            path.push_str(part);
        }

        let joined = format!("{}/{}", root.as_str().trim_end_matches('/'), path);
        Url::parse(&joined)
            .map_err(|err| TransportError::Invalid(format!("invalid endpoint URL {joined}: {err}")))
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn invoke(&self, invocation: Invocation) -> Result<ApiResponse, TransportError> {
        let descriptor = self.registry.get(invocation.resource.name()).ok_or_else(|| {
            TransportError::Invalid(format!(
                "resource {} is not registered",
                invocation.resource.name()
            ))
        })?;
        let operation = descriptor
            .operations
            .iter()
            .find(|op| op.name == invocation.operation)
            .ok_or(TransportError::UnknownOperation {
                resource: descriptor.name,
                operation: invocation.operation,
            })?;

        let url = self.endpoint(operation.template, &invocation.path_args)?;
        debug!(resource = descriptor.name, operation = operation.name, %url, "invoking API operation");

        let mut request = self.http.request(operation.method.clone(), url.clone());
        if !self.default_params.is_empty() || !invocation.params.is_empty() {
            let mut merged = self.default_params.clone();
            merged.extend(invocation.params.iter().cloned());
            request = request.query(&merged);
        }
        if let Some(body) = &invocation.body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))?;

        if status.is_client_error() || status.is_server_error() {
            return Err(classify_failure(status, &url, text));
        }

        Ok(ApiResponse { status: status.as_u16(), body: decode_body(&text) })
    }
}

fn classify_failure(status: StatusCode, url: &Url, body: String) -> TransportError {
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        TransportError::Auth { status: status.as_u16() }
    } else if status == StatusCode::NOT_FOUND {
        TransportError::NotFound { url: url.to_string() }
    } else if status.is_client_error() {
        TransportError::Client { status: status.as_u16(), message }
    } else {
        TransportError::Server { status: status.as_u16(), message }
    }
}

/// Decode a response body. Empty bodies become null; non-JSON text (the
/// token endpoint answers with a bare string on some server versions)
/// becomes a JSON string.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_with_root(root: &str) -> RestTransport {
        RestTransport::new(TransportConfig {
            root_url: Some(Url::parse(root).expect("root url")),
            default_params: Vec::new(),
            default_headers: HeaderMap::new(),
            timeout: Duration::from_secs(5),
            tls_verify: true,
        })
        .expect("transport")
    }

    #[test]
    fn registry_holds_all_nine_resources() {
        let transport = transport_with_root("http://localhost/_api");
        assert_eq!(transport.registry.len(), 9);
        for resource in Resource::ALL {
            assert!(transport.registry.contains_key(resource.name()));
        }
    }

    #[test]
    fn endpoint_substitutes_and_encodes_path_args() {
        let transport = transport_with_root("http://localhost/_api");
        let url = transport
            .endpoint("v3/ws/{}/hosts/{}", &["my ws".to_string(), "12".to_string()])
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost/_api/v3/ws/my%20ws/hosts/12");
    }

    #[test]
    fn endpoint_rejects_argument_count_mismatch() {
        let transport = transport_with_root("http://localhost/_api");
        let err = transport.endpoint("v3/ws/{}", &[]).expect_err("mismatch");
        assert!(matches!(err, TransportError::Invalid(_)));
    }

    #[test]
    fn endpoint_requires_a_configured_root() {
        let transport = RestTransport::new(TransportConfig {
            root_url: None,
            default_params: Vec::new(),
            default_headers: HeaderMap::new(),
            timeout: Duration::from_secs(5),
            tls_verify: true,
        })
        .expect("transport");

        let err = transport.endpoint("v3/ws", &[]).expect_err("no root");
        match err {
            TransportError::Connection(msg) => assert!(msg.contains("base URL")),
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[test]
    fn classify_failure_maps_statuses() {
        let url = Url::parse("http://localhost/_api/v3/ws").expect("url");
        assert!(matches!(
            classify_failure(StatusCode::UNAUTHORIZED, &url, String::new()),
            TransportError::Auth { status: 401 }
        ));
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, &url, String::new()),
            TransportError::Auth { status: 403 }
        ));
        assert!(matches!(
            classify_failure(StatusCode::NOT_FOUND, &url, String::new()),
            TransportError::NotFound { .. }
        ));
        assert!(matches!(
            classify_failure(StatusCode::CONFLICT, &url, String::new()),
            TransportError::Client { status: 409, .. }
        ));
        assert!(matches!(
            classify_failure(StatusCode::INTERNAL_SERVER_ERROR, &url, String::new()),
            TransportError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn decode_body_handles_json_text_and_empty() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("\"token\""), Value::String("token".to_string()));
        assert_eq!(decode_body("{\"a\":1}")["a"], 1);
        assert_eq!(decode_body("plain text"), Value::String("plain text".to_string()));
    }
}
