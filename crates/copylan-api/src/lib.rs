// copylan-api: Async Rust client for the Prisma SD-WAN controller API

pub mod auth;
pub mod client;
pub mod elements;
pub mod error;
pub mod interfaces;
pub mod models;
pub mod staticroutes;
pub mod transport;

pub use auth::{ApiVersions, ServiceAccount};
pub use client::SdwanClient;
pub use error::Error;
pub use models::{Element, Interface, StaticRoute};
pub use transport::{TlsMode, TransportConfig};
