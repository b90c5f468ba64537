//! Lens module
//!
//! This module provides high-level "lens" abstractions that combine business logic
//! with output formatting, so the same operation can back the CLI or any other
//! front end.
//!
//! # Architecture
//!
//! Each lens module exports:
//! - A **Lens struct** (e.g., `InspectLens`) - the main entry point for all operations
//! - **Input types** - what the lens operates on (e.g., `InspectTarget`)
//! - **Output types** - return types that know how to render themselves
//!
//! ```rust,ignore
//! use check_db::lens::inspect::{InspectLens, InspectTarget, InspectOutcome};
//! use check_db::lens::utils::OutputFormat;
//! ```

pub mod utils;

pub mod inspect;
