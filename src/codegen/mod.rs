// src/codegen/mod.rs
pub mod context;
pub mod function_registry;
pub mod jit;
pub mod ops;
pub mod values;

pub use context::{Cg, CompileCtx, SemaRefs};
pub use function_registry::{CodegenFnRegistry, RuntimeFn};
pub use jit::JitContext;
pub use values::{cl_type, ExprValue};
