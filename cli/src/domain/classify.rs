//! Deal/task status classification.
//!
//! Pure functions over the JSON document returned by `deals status <id>`.
//! No I/O, no async.

use serde_json::Value;
use sonm_common::InstanceStatus;

/// Property the plugin stamps on every order it places. Deals whose order
/// lacks it belong to some other marketplace consumer.
pub const MARKER_PROPERTY: &str = "sonm_deadline";

const MARKER_PATH: [&str; 6] = [
    "info",
    "order",
    "slot",
    "resources",
    "properties",
    MARKER_PROPERTY,
];

/// Task state derived from a deal status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// The deal was not placed by this plugin.
    IsNotManaged,
    Unknown,
    Spooling,
    Spawning,
    Running,
    Finished,
    Broken,
    /// No task of ours exists in the deal; one has to be started.
    Empty,
}

impl TaskState {
    /// Map a backend task status code.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Spooling,
            2 => Self::Spawning,
            3 => Self::Running,
            4 => Self::Finished,
            5 => Self::Broken,
            _ => Self::Unknown,
        }
    }

    /// Map a raw `status` value, which is either a JSON integer or a numeric string.
    #[must_use]
    pub fn from_raw(raw: Option<&Value>) -> Self {
        let code = match raw {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        code.map_or(Self::Unknown, Self::from_code)
    }

    /// Whether the reconciler must issue a task start for this deal.
    #[must_use]
    pub fn needs_start(self) -> bool {
        self == Self::Empty
    }

    /// Host-facing status, or `None` when the deal must not be reported at all.
    ///
    /// `Empty` reports as `Pending` because the caller starts a task before
    /// returning.
    #[must_use]
    pub fn instance_status(self) -> Option<InstanceStatus> {
        match self {
            Self::IsNotManaged => None,
            Self::Unknown | Self::Spooling | Self::Spawning | Self::Empty => {
                Some(InstanceStatus::Pending)
            }
            Self::Running => Some(InstanceStatus::Running),
            Self::Finished | Self::Broken => Some(InstanceStatus::Stopped),
        }
    }
}

/// Whether the deal's order carries the plugin's marker property.
#[must_use]
pub fn is_managed(doc: &Value) -> bool {
    lookup(doc, &MARKER_PATH).is_some()
}

/// Classify one deal status document.
///
/// The marker check runs first and dominates every other field. Within a
/// status map the entry with the smallest task id wins when several share the
/// expected image.
#[must_use]
pub fn classify(doc: &Value, image: &str) -> TaskState {
    if !is_managed(doc) {
        return TaskState::IsNotManaged;
    }
    if lookup(doc, &["info", "running"]).is_none() {
        return TaskState::Unknown;
    }

    let running = lookup(doc, &["info", "running", "statuses"]);
    let completed = lookup(doc, &["info", "completed", "statuses"]);
    if running.is_none() && completed.is_none() {
        return TaskState::Empty;
    }

    [running, completed]
        .into_iter()
        .flatten()
        .find_map(|statuses| find_image(statuses, image))
        .map_or(TaskState::Empty, |(_, entry)| {
            TaskState::from_raw(entry.get("status"))
        })
}

/// Id of the running task with the expected image, if any.
#[must_use]
pub fn running_task<'a>(doc: &'a Value, image: &str) -> Option<&'a str> {
    lookup(doc, &["info", "running", "statuses"])
        .and_then(|statuses| find_image(statuses, image))
        .map(|(task_id, _)| task_id)
}

/// Supplier the deal is bound to (`deal.SupplierID`).
#[must_use]
pub fn supplier_id(doc: &Value) -> Option<&str> {
    lookup(doc, &["deal", "SupplierID"]).and_then(Value::as_str)
}

/// Walk `path` through nested objects. `null` counts as absent.
fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(doc, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

fn find_image<'a>(statuses: &'a Value, image: &str) -> Option<(&'a str, &'a Value)> {
    statuses
        .as_object()?
        .iter()
        .filter(|(_, entry)| entry.get("imageName").and_then(Value::as_str) == Some(image))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(task_id, entry)| (task_id.as_str(), entry))
}
