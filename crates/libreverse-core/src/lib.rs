//! Libreverse Core Library
//!
//! This crate provides shared types, errors, and configuration for the
//! Libreverse desktop launcher.

pub mod config;
pub mod error;
pub mod types;

pub use config::LauncherConfig;
pub use error::{LauncherError, LauncherResult};
pub use types::{Address, LoadOutcome, UpdateInfo, UpdateProgress, UpdateState, WindowKind};
