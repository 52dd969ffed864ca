// src/lib.rs

pub mod codegen;
pub mod errors;
pub mod frontend;
pub mod runtime;
pub mod sema;
