//! Output formatting module

pub mod human;
pub mod json;
pub mod styles;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
use sonm_common::{CloudInstance, HardwareType, OsImage};

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

/// Output context carrying styling and the quiet flag.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors = !no_color && Term::stdout().is_term();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renderer selected by the `--json` flag.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn instances(&self, instances: &[CloudInstance]) -> Result<()> {
        match self {
            Self::Human(r) => r.render_instances(instances),
            Self::Json(r) => r.render(instances)?,
        }
        Ok(())
    }

    /// Human mode reports each requested id; JSON mode prints the ids the
    /// action went through for.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn outcome(&self, verb: &str, requested: &[String], done: &[String]) -> Result<()> {
        match self {
            Self::Human(r) => r.render_outcome(verb, requested, done),
            Self::Json(r) => r.render(done)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn access(&self, granted: bool) -> Result<()> {
        match self {
            Self::Human(r) => r.render_access(granted),
            Self::Json(r) => r.render_access(granted)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn hardware_types(&self, types: &[HardwareType]) -> Result<()> {
        match self {
            Self::Human(r) => r.render_hardware_types(types),
            Self::Json(r) => r.render(types)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn os_images(&self, images: &[OsImage]) -> Result<()> {
        match self {
            Self::Human(r) => r.render_os_images(images),
            Self::Json(r) => r.render(images)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn settings(&self, values: &BTreeMap<String, String>, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => r.render_settings(values, path),
            Self::Json(r) => r.render(&serde_json::json!({
                "path": path.display().to_string(),
                "settings": values,
            }))?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn value(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(r) => r.render_value(value),
            Self::Json(r) => r.render_value(key, value)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn path(&self, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => r.render_path(path),
            Self::Json(r) => r.render_path(path)?,
        }
        Ok(())
    }
}
