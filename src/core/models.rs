//! Wire types for the cloud resource API.
//!
//! Field names follow the JSON the server emits (`costPerMonth`, `networkIn`,
//! `lastLogin`, ...). Label-like fields are closed enums with an `Other`
//! fallback so an unexpected server value never fails a whole list decode.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned resource identifier.
pub type ResourceId = i64;

/// Declares a string-backed label enum: known variants map to fixed labels,
/// anything else lands in `Other(String)` and round-trips unchanged.
macro_rules! wire_label {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Every known (non-`Other`) value, in declaration order.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($label => $name::$variant,)+
                    _ => $name::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.label().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

wire_label! {
    /// Cloud provider hosting a resource.
    Provider {
        Aws => "AWS",
        Gcp => "GCP",
        Azure => "Azure",
    }
}

wire_label! {
    /// Kind of cloud resource.
    ResourceType {
        Vm => "VM",
        Storage => "Storage",
        Database => "Database",
        LoadBalancer => "Load Balancer",
        Serverless => "Serverless",
    }
}

wire_label! {
    /// Lifecycle status reported by the server. Open-ended: the server also
    /// emits values such as `Creating`, `Failed` or `NotSupportedInFreeTier`.
    ResourceStatus {
        Running => "Running",
        Stopped => "Stopped",
        Unknown => "Unknown",
    }
}

wire_label! {
    /// Alert severity.
    Severity {
        Critical => "Critical",
        Warning => "Warning",
        Info => "Info",
    }
}

wire_label! {
    /// Role recorded on a directory user. Unrelated to the acting session
    /// role, which is chosen at login.
    DirectoryRole {
        Admin => "Admin",
        Developer => "Developer",
        Viewer => "Viewer",
    }
}

wire_label! {
    /// Outcome recorded on an audit log entry.
    LogStatus {
        Success => "Success",
        Failure => "Failure",
    }
}

impl Default for ResourceStatus {
    fn default() -> Self {
        ResourceStatus::Unknown
    }
}

impl ResourceStatus {
    /// Stopped and Unknown resources count as idle.
    pub fn is_idle(&self) -> bool {
        matches!(self, ResourceStatus::Stopped | ResourceStatus::Unknown)
    }
}

/// A cloud resource record as served by `GET /resources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub provider: Provider,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_month: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Resource {
    /// Monthly cost, with a missing value counted as zero.
    pub fn cost_or_zero(&self) -> f64 {
        self.cost_per_month.unwrap_or(0.0)
    }

    /// Whether the cost is set and non-zero.
    pub fn has_cost(&self) -> bool {
        let cost = self.cost_or_zero();
        cost != 0.0 && !cost.is_nan()
    }

    /// VMs on one of the three known providers can be monitored.
    pub fn is_monitorable(&self) -> bool {
        self.resource_type == ResourceType::Vm
            && matches!(
                self.provider,
                Provider::Aws | Provider::Gcp | Provider::Azure
            )
    }
}

/// Body of `POST /resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub name: String,
    pub provider: Provider,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub region: String,
}

impl NewResource {
    /// Build a create request; the name is trimmed.
    pub fn new(
        name: &str,
        provider: Provider,
        resource_type: ResourceType,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            provider,
            resource_type,
            region: region.into(),
        }
    }
}

/// Body of `PUT /resources/{id}`: only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ResourcePatch {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
            ..Self::default()
        }
    }

    pub fn status(status: ResourceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.region.is_none() && self.status.is_none() && self.tags.is_none()
    }
}

/// Acknowledgement of `DELETE /resources/{id}`. No body contract is assumed,
/// only the HTTP status is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAck {
    pub status: u16,
}

/// Entry of `GET /alerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub time: String,
}

/// Directory user id: the server sends numbers, local records use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// Directory user record from `GET /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: DirectoryRole,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub last_login: String,
}

/// Audit trail entry from `GET /logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub user: String,
    pub action: String,
    #[serde(default)]
    pub resource: String,
    pub status: LogStatus,
    pub provider: Provider,
}

/// One sample of `GET /resources/{id}/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    pub time: String,
    pub cpu: f64,
    pub memory: f64,
    pub network_in: f64,
    pub network_out: f64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
