// src/errors/mod.rs
//! Structured error reporting for the Spice compiler core.
//!
//! Semantic errors carry miette diagnostics with stable codes; codegen errors
//! are internal-compiler-error surfaces and are never attributed to user input.

pub mod codegen;
pub mod report;
pub mod sema;

pub use codegen::CodegenError;
pub use report::{plain_handler, render_soft_errors, render_to_string, terminal_handler};
pub use sema::{SemanticError, SoftError};
