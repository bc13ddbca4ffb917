//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod classify;
pub mod descriptor;
pub mod error;
pub mod market;
pub mod settings;

pub use classify::{TaskState, classify, is_managed, running_task, supplier_id};
pub use descriptor::{Block, Node, bid_descriptor, task_descriptor};
pub use error::{ConfigError, MarketError};
pub use market::{Deal, DealStatus, parse_confirmed_id, parse_deal_list};
pub use settings::{Endpoint, Settings, validate_setting_key};
