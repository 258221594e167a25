//! Nutrition Calculator CLI Library
//!
//! Configuration loading and report building for the demonstration binary,
//! exposed as a library for tests.

pub mod config;
pub mod report;
