// src/codegen/context.rs
//
// Codegen context types. CompileCtx bundles the per-module state threaded
// through instruction selection; Cg pairs it with the active FunctionBuilder.
// Selector methods are implemented across multiple files using split impl
// blocks.

use cranelift::prelude::*;
use cranelift_codegen::ir::FuncRef;
use cranelift_jit::JITModule;
use cranelift_module::Module;

use crate::errors::CodegenError;
use crate::sema::{FunctionId, FunctionRegistry, Scope, SymbolTable, TypeChecker, TypeRegistry};

use super::function_registry::{CodegenFnRegistry, RuntimeFn};

/// Read-only views into the checked program, borrowed for one compilation.
pub struct SemaRefs<'a> {
    pub types: &'a TypeRegistry,
    pub functions: &'a FunctionRegistry,
    pub symbols: &'a SymbolTable,
    pub scope: &'a Scope,
    pub man_idx: usize,
}

impl<'a> SemaRefs<'a> {
    pub fn from_checker(checker: &'a TypeChecker) -> Self {
        Self {
            types: &checker.types,
            functions: &checker.functions,
            symbols: &checker.symbols,
            scope: &checker.current_scope,
            man_idx: checker.man_idx,
        }
    }
}

/// Per-module compilation state.
pub struct CompileCtx<'a> {
    pub sema: &'a SemaRefs<'a>,
    pub module: &'a mut JITModule,
    pub func_registry: &'a mut CodegenFnRegistry,
    pub pointer_type: Type,
}

/// Instruction selection context for one function body.
///
/// Lifetimes: 'a is the local borrow of the compile context, 'b the
/// FunctionBuilder's internal data, 'ctx the compile context's own borrows.
pub struct Cg<'a, 'b, 'ctx> {
    pub builder: FunctionBuilder<'b>,
    pub ctx: &'a mut CompileCtx<'ctx>,
}

impl Cg<'_, '_, '_> {
    pub fn types(&self) -> &TypeRegistry {
        self.ctx.sema.types
    }

    pub fn pointer_type(&self) -> Type {
        self.ctx.pointer_type
    }

    /// Call a runtime support function and return its (single) result.
    pub fn call_runtime(
        &mut self,
        runtime_fn: RuntimeFn,
        args: &[Value],
    ) -> Result<Value, CodegenError> {
        let func_id = self.ctx.func_registry.runtime_id(self.ctx.module, runtime_fn)?;
        let func_ref = self
            .ctx
            .module
            .declare_func_in_func(func_id, self.builder.func);
        let call = self.builder.ins().call(func_ref, args);
        let results = self.builder.inst_results(call);
        results.first().copied().ok_or_else(|| {
            CodegenError::Internal(format!("runtime fn {} has no result", runtime_fn.symbol()))
        })
    }

    /// FuncRef for a user operator overload, importing it into the current
    /// function on demand.
    pub fn func_ref_for(&mut self, callee: FunctionId) -> Result<FuncRef, CodegenError> {
        let func_id = self.ctx.func_registry.overload_id(
            self.ctx.module,
            callee,
            self.ctx.sema.functions,
            self.ctx.sema.types,
        )?;
        Ok(self
            .ctx
            .module
            .declare_func_in_func(func_id, self.builder.func))
    }
}
