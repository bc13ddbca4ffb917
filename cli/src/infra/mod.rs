//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! marketplace CLI adapter, settings files, and descriptor files.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod descriptor_file;
pub mod marketplace;
pub mod settings;

pub use command_runner::TokioCommandRunner;
pub use descriptor_file::TempDescriptorWriter;
pub use marketplace::CliMarketplace;
pub use settings::YamlSettingsStore;
