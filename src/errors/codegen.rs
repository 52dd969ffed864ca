// src/errors/codegen.rs
//! Code generation errors (E9xxx).
//!
//! These are internal-compiler-error surfaces: a type combination the checker
//! accepted must always have a matching selector branch, so any error here is
//! a compiler bug, not a user diagnostic.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CodegenError {
    #[error("internal compiler error: unhandled branch for operator '{op}' on {combination}")]
    #[diagnostic(code(E9001), help("this is a bug in the compiler, please report it"))]
    UnhandledBranch { op: String, combination: String },

    #[error("internal compiler error: {0}")]
    #[diagnostic(code(E9002))]
    Internal(String),

    #[error("module error: {0}")]
    #[diagnostic(code(E9003))]
    Module(String),
}

impl From<cranelift_module::ModuleError> for CodegenError {
    fn from(err: cranelift_module::ModuleError) -> Self {
        CodegenError::Module(err.to_string())
    }
}
