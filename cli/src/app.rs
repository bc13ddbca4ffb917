//! Application context — unified state passed to every command handler.
//!
//! `AppContext` owns the output settings and the settings store, and wires
//! the production adapters into a `Reconciler` on demand.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::Reconciler;
use crate::application::ports::SettingsSource as _;
use crate::infra::{CliMarketplace, TempDescriptorWriter, TokioCommandRunner, YamlSettingsStore};
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Reconciler wired to the real marketplace CLI, settings file, and temp dir.
pub type ProductionReconciler =
    Reconciler<CliMarketplace<TokioCommandRunner>, YamlSettingsStore, TempDescriptorWriter>;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Explicit settings file (`--config`).
    pub config: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Settings file plus environment overrides.
    pub settings: YamlSettingsStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if no settings path is given and the home directory
    /// cannot be determined.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            settings: YamlSettingsStore::from_environment(flags.config)?,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Build a reconciler over the production adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read or `CommandTimeout`
    /// is not a positive number of seconds.
    pub fn reconciler(&self) -> Result<ProductionReconciler> {
        let timeout = self.settings.load()?.command_timeout()?;
        Ok(Reconciler::new(
            CliMarketplace::new(TokioCommandRunner::new(timeout)),
            self.settings.clone(),
            TempDescriptorWriter::system(),
        ))
    }
}
