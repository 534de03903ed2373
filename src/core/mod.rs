//! Core building blocks shared by the loader, the bridge and the binary:
//! configuration, credentials, startup errors and naming utilities.

pub mod config;
pub mod credential;
pub mod error;
pub mod utils;

pub use config::{Config, ConfigBuilder, TransportKind};
pub use credential::ApiKey;
pub use error::{Error, Result};
