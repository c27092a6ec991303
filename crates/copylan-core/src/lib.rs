//! LAN configuration copy engine between Prisma SD-WAN elements.
//!
//! This crate owns everything between the raw controller client
//! (`copylan-api`) and the command line:
//!
//! - **[`Directory`]**: immutable name/id/site/model index of every
//!   element, built once per run with [`Directory::fetch`].
//!
//! - **[`classify`]**: maps an element model to its
//!   [`InterfaceTaxonomy`]: sub-interface appliances versus SVI
//!   appliances with a trunked parent port.
//!
//! - **[`reconcile`]**: pairs source and destination records by natural
//!   key (interface name, route prefix) and plans an [`Action`] per item
//!   with a read-only-free [`Payload`].
//!
//! - **[`sync::run`]**: executes a copy against any [`ElementApi`] and
//!   returns a [`RunSummary`] of per-item outcomes.
//!   [`session::oneshot`] connects, indexes and runs in one call.

pub mod api;
pub mod classify;
pub mod config;
pub mod directory;
pub mod error;
pub mod interfaces;
pub mod payload;
pub mod reconcile;
pub mod routes;
pub mod session;
pub mod summary;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::ElementApi;
pub use classify::{InterfaceTaxonomy, classify};
pub use config::{SessionConfig, TlsVerification};
pub use directory::{Directory, ElementRef};
pub use error::CoreError;
pub use payload::{Payload, READ_ONLY_FIELDS, Record};
pub use reconcile::{Action, reconcile};
pub use summary::{ActionOutcome, Operation, Resource, RunSummary, Status};
pub use sync::SyncRequest;

pub use copylan_api::{ApiVersions, ServiceAccount};
