// src/errors/sema.rs
//! Semantic analysis errors (E21xx).

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::frontend::Span;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SemanticError {
    #[error("{message}")]
    #[diagnostic(code(E2101))]
    OperatorWrongDataType {
        message: String,
        #[label("no matching operator rule")]
        span: SourceSpan,
    },

    #[error("unsafe operation: {message}")]
    #[diagnostic(
        code(E2102),
        help("wrap the expression in an 'unsafe {{ ... }}' block")
    )]
    UnsafeOperationInSafeContext {
        message: String,
        #[label("requires an unsafe block")]
        span: SourceSpan,
    },

    #[error("cannot reassign constant '{name}'")]
    #[diagnostic(code(E2103))]
    ReassignConstVariable {
        name: String,
        #[label("declared const")]
        span: SourceSpan,
    },

    #[error("temporary value bound to non-const reference")]
    #[diagnostic(
        code(E2104),
        help("bind the temporary to a const reference or store it in a variable first")
    )]
    TempToNonConstRef {
        #[label("temporary does not outlive the reference")]
        span: SourceSpan,
    },

    #[error("returning a reference to a temporary value")]
    #[diagnostic(code(E2105))]
    ReturnOfTemporaryValue {
        #[label("temporary is destroyed at the end of the statement")]
        span: SourceSpan,
    },

    #[error("insufficient visibility for operator overload '{signature}'")]
    #[diagnostic(code(E2106), help("mark the overload 'public' in its source file"))]
    InsufficientVisibility {
        signature: String,
        #[label("not accessible from here")]
        span: SourceSpan,
    },
}

/// A deferred diagnostic: collected during a file's checking sweep and reported
/// in batch once the sweep completes, instead of aborting at the first one.
#[derive(Debug, Clone)]
pub struct SoftError {
    pub error: SemanticError,
    pub span: Span,
}

impl SoftError {
    pub fn new(error: SemanticError, span: Span) -> Self {
        Self { error, span }
    }
}
