//! Unit tests for xwork CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod operations;
mod result_service;
mod work_service;
