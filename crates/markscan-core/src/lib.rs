//! Markscan Core
//!
//! This crate provides core types and error definitions shared by the
//! markscan scanners, configuration, and CLI.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Window`] - A bounded view over source bytes that scanners work against
//! - [`AttributeRecord`], [`AttributeKind`] - Offsets produced by the attribute parser
//! - [`Prioritized`], [`PrioritizedList`] - Priority-ordered registries for pipeline extensions
//! - [`MarkscanError`] - Error types

pub mod error;
pub mod prioritized;
pub mod types;

pub use error::{MarkscanError, Result};
pub use prioritized::{Prioritized, PrioritizedList};
pub use types::{AttributeKind, AttributeRecord, Window};
