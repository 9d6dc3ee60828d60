//! Module layer for certificate chain disclosure
//!
//! Connects the session layer's entry points to the core encoder. Manual
//! commands and lifecycle events all resolve to a [`Trigger`] and go through
//! the same [`CertInfoModule::dispatch`] path.
//!
//! # Components
//!
//! - [`CertInfoModule`]: Capability hooks, command handling, lifecycle events
//! - [`Trigger`]: Invocation entry points
//! - [`commands`]: Text command parsing and help output

pub mod commands;
mod module;
mod trigger;

pub use commands::Command;
pub use module::{CertInfoModule, Delivery, MODULE_DESCRIPTION};
pub use trigger::Trigger;
