//! Common utilities for the Lumen rendering pipeline.
//!
//! This crate provides shared infrastructure used by all pipeline stages:
//! - **Warning System** - colored terminal output for recovered input problems

pub mod warning;
