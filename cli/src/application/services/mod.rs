//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod artifact;
pub mod deploy;
pub mod invoke;
pub mod operations;
pub mod result;
pub mod session;
pub mod work;
