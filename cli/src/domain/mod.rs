//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod application;
pub mod artifact;
pub mod config;
pub mod error;
pub mod record;
pub mod result;
pub mod session;
pub mod work;

pub use application::{AppConfig, ApplicationDescriptor, BinaryReference};
pub use artifact::{
    Address, AddressCodec, ArtifactMetadata, Identifier, XwAddressCodec, binary_field_name,
};
pub use config::{ChainTable, NetworkBinding, ProjectConfig, contract_address};
pub use error::{
    ArtifactError, ConfigError, DeployError, RemoteError, ResultError, SessionError, WorkError,
};
pub use record::ServerRecord;
pub use result::{ResultDescriptor, SaveTarget};
pub use session::{ChainEndpoint, Credential};
pub use work::{Work, WorkStatus};
