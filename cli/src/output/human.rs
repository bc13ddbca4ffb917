//! Human-readable terminal renderer.

use std::collections::BTreeMap;
use std::path::Path;

use owo_colors::OwoColorize as _;
use sonm_common::{CloudInstance, HardwareType, OsImage};

use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the instance table.
    pub fn render_instances(&self, instances: &[CloudInstance]) {
        if instances.is_empty() {
            self.ctx.info("No SONM instances.");
            return;
        }
        if self.ctx.quiet {
            for inst in instances {
                println!("{}", inst.id);
            }
            return;
        }
        let width = id_column_width(instances);
        println!(
            "  {}",
            format!("{:<width$}  {:<12}  {}", "ID", "STATUS", "NAME").style(self.ctx.styles.header)
        );
        for inst in instances {
            println!(
                "  {:<width$}  {:<12}  {}",
                inst.id,
                inst.status.as_str().style(self.ctx.styles.status(inst.status)),
                inst.name,
            );
        }
    }

    /// Report which of the `requested` ids the action went through for.
    pub fn render_outcome(&self, verb: &str, requested: &[String], done: &[String]) {
        for id in requested {
            if done.contains(id) {
                self.ctx.success(&format!("{verb} {id}"));
            } else {
                self.ctx.warn(&format!("Not {} {id}", verb.to_lowercase()));
            }
        }
        if requested.is_empty() {
            self.ctx.info("No instance ids given.");
        }
    }

    /// Render the outcome of the access check.
    pub fn render_access(&self, granted: bool) {
        if granted {
            self.ctx.success("Access verified");
        } else {
            self.ctx.error("Access denied");
        }
    }

    pub fn render_hardware_types(&self, types: &[HardwareType]) {
        for hw in types {
            self.ctx.kv(&format!("{:<8}", hw.id), &hw.name);
        }
    }

    pub fn render_os_images(&self, images: &[OsImage]) {
        for os in images {
            self.ctx.kv(&format!("{:<8}", os.id), &os.description);
        }
    }

    /// Render every known setting with its effective value.
    pub fn render_settings(&self, values: &BTreeMap<String, String>, path: &Path) {
        println!();
        self.ctx
            .header(&format!("Configuration ({})", path.display()));
        println!();
        for (key, value) in values {
            let shown = if value.is_empty() { "(not set)" } else { value };
            self.ctx.kv(&format!("{key:<16}"), shown);
        }
        println!();
    }

    /// Print a bare value so it can be captured by shell scripts.
    pub fn render_value(&self, value: &str) {
        println!("{value}");
    }

    pub fn render_path(&self, path: &Path) {
        println!("{}", path.display());
    }
}

/// Width of the ID column: the longest id, at least as wide as the header.
#[must_use]
pub fn id_column_width(instances: &[CloudInstance]) -> usize {
    instances
        .iter()
        .map(|i| i.id.chars().count())
        .max()
        .unwrap_or(0)
        .max("ID".len())
}
