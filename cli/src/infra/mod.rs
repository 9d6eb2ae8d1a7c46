//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the HTTP work-server
//! session, credential and configuration files, contract artifacts, and
//! project filesystem access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod contracts;
pub mod credentials;
pub mod fs;
pub mod http;
pub mod settings;
