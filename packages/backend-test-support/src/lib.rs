//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, Problem Details assertions, and unique value
//! generators for test isolation.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
