//! Common data types used throughout the client

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::BASELINE_WORKSPACE_USER;

/// Faraday product edition, derived from the server version string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Community,
    Pro,
    Corp,
}

impl Product {
    /// Map the product code letter found in a raw version string.
    /// Any letter other than `p` or `c` (or no letter at all) is community.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("p") => Self::Pro,
            Some("c") => Self::Corp,
            _ => Self::Community,
        }
    }
}

/// Server version information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub product: Product,
    pub version: String,
}

/// Outcome of a credential check against the login endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted, session established.
    Authenticated,
    /// Credentials accepted but the server expects a second factor.
    SecondFactorRequired,
    /// Credentials rejected.
    Rejected,
}

/// Users granted access to a workspace at creation time
///
/// Models the single-name-or-list input shape accepted by
/// workspace creation.
#[derive(Debug, Clone)]
pub enum WorkspaceUsers {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for WorkspaceUsers {
    fn from(user: &str) -> Self {
        Self::One(user.to_string())
    }
}

impl From<String> for WorkspaceUsers {
    fn from(user: String) -> Self {
        Self::One(user)
    }
}

impl From<Vec<String>> for WorkspaceUsers {
    fn from(users: Vec<String>) -> Self {
        Self::Many(users)
    }
}

impl From<Vec<&str>> for WorkspaceUsers {
    fn from(users: Vec<&str>) -> Self {
        Self::Many(users.into_iter().map(str::to_string).collect())
    }
}

/// Server-shaped payload for workspace creation
///
/// The `users` list always starts with the baseline user; caller-supplied
/// users are appended after it.
#[derive(Debug, Clone, Serialize)]
pub struct NewWorkspace {
    pub description: String,
    pub id: u32,
    pub name: String,
    pub public: bool,
    pub readonly: bool,
    pub customer: String,
    pub users: Vec<String>,
}

impl NewWorkspace {
    pub fn new(name: &str, description: &str, users: Option<WorkspaceUsers>) -> Self {
        let mut all_users = vec![BASELINE_WORKSPACE_USER.to_string()];
        match users {
            Some(WorkspaceUsers::One(user)) => all_users.push(user),
            Some(WorkspaceUsers::Many(more)) => all_users.extend(more),
            None => {}
        }
        Self {
            description: description.to_string(),
            id: 0,
            name: name.to_string(),
            public: false,
            readonly: false,
            customer: String::new(),
            users: all_users,
        }
    }
}

/// Payload for running an agent executor, scoped to a workspace and agent
#[derive(Debug, Clone, Serialize)]
pub struct ExecutorRun {
    #[serde(rename = "executorData")]
    pub executor_data: ExecutorData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutorData {
    pub agent_id: i64,
    pub args: Value,
    pub executor: String,
}

impl ExecutorRun {
    pub fn new(agent_id: i64, executor: &str, args: Value) -> Self {
        Self {
            executor_data: ExecutorData {
                agent_id,
                args,
                executor: executor.to_string(),
            },
        }
    }
}
