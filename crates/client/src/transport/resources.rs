//! Fixed registry of server resource groups
//!
//! Nine resources, each describing the operations available for one server
//! subsystem. No code path registers resources after transport construction,
//! so the set is a closed enum rather than a dynamically extensible table.

use reqwest::Method;

/// Named resource groups exposed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Login,
    Config,
    Workspace,
    BulkCreate,
    Host,
    Service,
    Credential,
    Agent,
    Vuln,
}

/// A single HTTP binding within a resource
///
/// `template` is relative to the API root; `{}` placeholders are filled
/// with percent-encoded path arguments in declaration order.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub name: &'static str,
    pub method: Method,
    pub template: &'static str,
}

/// Describes the operations available for one server subsystem
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub operations: &'static [OperationSpec],
}

static LOGIN_OPS: [OperationSpec; 4] = [
    OperationSpec { name: "auth", method: Method::POST, template: "login" },
    OperationSpec { name: "second_factor", method: Method::POST, template: "confirmation" },
    OperationSpec { name: "get_token", method: Method::GET, template: "v3/token" },
    OperationSpec { name: "validate", method: Method::GET, template: "session" },
];

static CONFIG_OPS: [OperationSpec; 1] =
    [OperationSpec { name: "config", method: Method::GET, template: "config" }];

static WORKSPACE_OPS: [OperationSpec; 4] = [
    OperationSpec { name: "list", method: Method::GET, template: "v3/ws" },
    OperationSpec { name: "get", method: Method::GET, template: "v3/ws/{}" },
    OperationSpec { name: "create", method: Method::POST, template: "v3/ws" },
    OperationSpec { name: "delete", method: Method::DELETE, template: "v3/ws/{}" },
];

static BULK_CREATE_OPS: [OperationSpec; 1] =
    [OperationSpec { name: "create", method: Method::POST, template: "v3/ws/{}/bulk_create" }];

static HOST_OPS: [OperationSpec; 6] = [
    OperationSpec { name: "list", method: Method::GET, template: "v3/ws/{}/hosts" },
    OperationSpec { name: "get", method: Method::GET, template: "v3/ws/{}/hosts/{}" },
    OperationSpec { name: "create", method: Method::POST, template: "v3/ws/{}/hosts" },
    OperationSpec { name: "delete", method: Method::DELETE, template: "v3/ws/{}/hosts/{}" },
    OperationSpec {
        name: "get_services",
        method: Method::GET,
        template: "v3/ws/{}/hosts/{}/services",
    },
    // vulnerabilities are filtered by target IP, not by host id
    OperationSpec { name: "get_vulns", method: Method::GET, template: "v3/ws/{}/vulns" },
];

static SERVICE_OPS: [OperationSpec; 1] =
    [OperationSpec { name: "list", method: Method::GET, template: "v3/ws/{}/services" }];

static CREDENTIAL_OPS: [OperationSpec; 1] =
    [OperationSpec { name: "list", method: Method::GET, template: "v3/ws/{}/credential" }];

static AGENT_OPS: [OperationSpec; 3] = [
    OperationSpec { name: "list", method: Method::GET, template: "v3/ws/{}/agents" },
    OperationSpec { name: "get", method: Method::GET, template: "v3/ws/{}/agents/{}" },
    OperationSpec { name: "run", method: Method::POST, template: "v3/ws/{}/agents/{}/run" },
];

static VULN_OPS: [OperationSpec; 1] =
    [OperationSpec { name: "list", method: Method::GET, template: "v3/ws/{}/vulns" }];

impl Resource {
    /// Every resource, in registration order. All nine must be present in
    /// the transport registry before any domain operation is callable.
    pub const ALL: [Resource; 9] = [
        Resource::Login,
        Resource::Config,
        Resource::Workspace,
        Resource::BulkCreate,
        Resource::Host,
        Resource::Service,
        Resource::Credential,
        Resource::Agent,
        Resource::Vuln,
    ];

    pub fn descriptor(self) -> ResourceDescriptor {
        match self {
            Self::Login => ResourceDescriptor { name: "login", operations: &LOGIN_OPS },
            Self::Config => ResourceDescriptor { name: "config", operations: &CONFIG_OPS },
            Self::Workspace => {
                ResourceDescriptor { name: "workspace", operations: &WORKSPACE_OPS }
            }
            Self::BulkCreate => {
                ResourceDescriptor { name: "bulk_create", operations: &BULK_CREATE_OPS }
            }
            Self::Host => ResourceDescriptor { name: "host", operations: &HOST_OPS },
            Self::Service => ResourceDescriptor { name: "service", operations: &SERVICE_OPS },
            Self::Credential => {
                ResourceDescriptor { name: "credential", operations: &CREDENTIAL_OPS }
            }
            Self::Agent => ResourceDescriptor { name: "agent", operations: &AGENT_OPS },
            Self::Vuln => ResourceDescriptor { name: "vuln", operations: &VULN_OPS },
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up one operation binding by name.
    pub fn operation(self, name: &str) -> Option<&'static OperationSpec> {
        self.descriptor().operations.iter().find(|op| op.name == name)
    }
}
