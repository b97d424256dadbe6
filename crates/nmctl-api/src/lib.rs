// nmctl-api: Async Rust client for the Netmaker management API

pub mod auth;
pub mod client;
pub mod error;
pub mod extclients;
pub mod models;
pub mod networks;
pub mod nodes;
pub mod transport;

pub use client::{NetmakerClient, Response};
pub use error::Error;
pub use models::Resource;
pub use transport::{TlsMode, TransportConfig};
