//! Client side of the device backend's HTTP surface.
//!
//! This module defines the wire types, the [`RemoteService`] seam used by the
//! synchronizers, and the reqwest-backed [`HttpRemote`] implementation.

pub mod config;
pub mod data;
pub mod http;
pub mod traits;

// Re-export commonly used items
pub use config::ClientConfig;
pub use data::{Acknowledgement, Command, MoistureField, RawLogRecord};
pub use http::HttpRemote;
pub use traits::RemoteService;
