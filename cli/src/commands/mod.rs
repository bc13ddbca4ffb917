//! Command implementations

pub mod catalog;
pub mod config;
pub mod create;
pub mod lifecycle;
pub mod list;
