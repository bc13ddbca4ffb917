use serde::{Deserialize, Serialize};

/// Identifier used for the single hardware type and OS image the plugin offers.
pub const SONM_CATALOG_ID: &str = "SONM";

/// Hostname reported for every marketplace-backed instance.
pub const SONM_HOSTNAME: &str = "SONM";

/// Instance status as understood by the render manager.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Pending,
    Running,
    Stopped,
    Terminated,
    Unknown,
}

impl InstanceStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compute resource as the render manager sees it.
///
/// For marketplace-backed instances `id` is the deal id (or the order id right
/// after creation, before the marketplace has matched the order into a deal).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudInstance {
    pub id: String,
    pub name: String,
    pub hostname: String,
    pub status: InstanceStatus,
}

impl CloudInstance {
    /// Build an instance with the plugin's naming convention (`SONM <id>`).
    #[must_use]
    pub fn sonm(id: &str, status: InstanceStatus) -> Self {
        Self {
            id: id.to_string(),
            name: format!("SONM {id}"),
            hostname: SONM_HOSTNAME.to_string(),
            status,
        }
    }
}

/// Hardware type offered to the render manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HardwareType {
    pub id: String,
    pub name: String,
}

/// OS image offered to the render manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsImage {
    pub id: String,
    pub description: String,
}
