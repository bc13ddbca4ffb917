//! Bid and task descriptors handed to the marketplace CLI.
//!
//! Descriptors are built as a small ordered document tree and rendered to
//! nested-block text (two spaces per level). Nothing here validates values:
//! unset settings render as empty strings and the CLI reports the problem.

use crate::domain::classify::MARKER_PROPERTY;
use crate::domain::settings::{DEFAULT_GPU_COUNT, DEFAULT_NETWORK_TYPE, Settings, keys};

/// Mount spec for the render repository share inside the worker container.
pub const REPOSITORY_MOUNT: &str = "cifs:/mnt/deadlinerepository10:rw";

const CIFS_VERSION: &str = "3.0";
const INDENT: &str = "  ";

/// One value in a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    Block(Block),
    /// Rendered inline in flow style, e.g. `["a", "b"]`.
    List(Vec<String>),
}

/// Ordered mapping of keys to nodes. Insertion order is render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    entries: Vec<(String, Node)>,
}

impl Block {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scalar(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries
            .push((key.to_string(), Node::Scalar(value.into())));
        self
    }

    #[must_use]
    pub fn block(mut self, key: &str, block: Block) -> Self {
        self.entries.push((key.to_string(), Node::Block(block)));
        self
    }

    #[must_use]
    pub fn list(mut self, key: &str, items: &[&str]) -> Self {
        let items = items.iter().map(|s| (*s).to_string()).collect();
        self.entries.push((key.to_string(), Node::List(items)));
        self
    }

    /// Follow a path of keys through nested blocks.
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let node = self
            .entries
            .iter()
            .find(|(k, _)| k == first)
            .map(|(_, n)| n)?;
        match (node, rest.is_empty()) {
            (_, true) => Some(node),
            (Node::Block(inner), false) => inner.get(rest),
            _ => None,
        }
    }

    /// Render as nested-block text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_block(&mut out, self, 0);
        out
    }
}

fn write_block(out: &mut String, block: &Block, level: usize) {
    for (key, node) in &block.entries {
        out.push_str(&INDENT.repeat(level));
        out.push_str(key);
        out.push(':');
        match node {
            Node::Scalar(value) => {
                out.push(' ');
                out.push_str(value);
                out.push('\n');
            }
            Node::Block(inner) => {
                out.push('\n');
                write_block(out, inner, level + 1);
            }
            Node::List(items) => {
                out.push(' ');
                out.push_str(&serde_json::Value::from(items.clone()).to_string());
                out.push('\n');
            }
        }
    }
}

// ── Builders ─────────────────────────────────────────────────────────────────

/// Order document for `market create`. Carries the marker property that
/// later lets the classifier recognise deals placed by this plugin.
#[must_use]
pub fn bid_descriptor(settings: &Settings) -> Block {
    let resources =
        resources(settings).block("properties", Block::new().scalar(MARKER_PROPERTY, "true"));
    Block::new()
        .scalar("duration", settings.get(keys::DURATION, ""))
        .block("resources", resources)
}

/// Container launch document for `tasks start`.
#[must_use]
pub fn task_descriptor(settings: &Settings) -> Block {
    let cifs_options = Block::new()
        .scalar("share", settings.get(keys::CIFS_SHARE, ""))
        .scalar("username", settings.get(keys::CIFS_USERNAME, ""))
        .scalar("password", settings.get(keys::CIFS_PASSWORD, ""))
        .scalar("vers", CIFS_VERSION);

    let container = Block::new()
        .scalar("commit_on_stop", "false")
        .scalar("name", settings.image_name())
        .block(
            "volumes",
            Block::new().block(
                "cifs",
                Block::new()
                    .scalar("type", "cifs")
                    .block("options", cifs_options),
            ),
        )
        .list("mounts", &[REPOSITORY_MOUNT]);

    Block::new().block(
        "task",
        Block::new()
            .list("miners", &[])
            .block("container", container)
            .block("resources", resources(settings)),
    )
}

fn resources(settings: &Settings) -> Block {
    Block::new()
        .scalar("cpu_cores", settings.get(keys::CPU_CORES, ""))
        .scalar("ram_bytes", settings.get(keys::RAM_BYTES, ""))
        .scalar("gpu_count", settings.get(keys::GPU_COUNT, DEFAULT_GPU_COUNT))
        .scalar("storage", settings.get(keys::STORAGE, ""))
        .block(
            "network",
            Block::new()
                .scalar("in", settings.get(keys::NETWORK_IN, ""))
                .scalar("out", settings.get(keys::NETWORK_OUT, ""))
                .scalar("type", settings.get(keys::NETWORK_TYPE, DEFAULT_NETWORK_TYPE)),
        )
}
