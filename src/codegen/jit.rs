// src/codegen/jit.rs

use cranelift::prelude::*;
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{FuncId, Linkage, Module};
use rustc_hash::FxHashMap;

use crate::errors::CodegenError;
use crate::runtime;
use crate::sema::QualType;

use super::context::{Cg, CompileCtx, SemaRefs};
use super::function_registry::{CodegenFnRegistry, RuntimeFn};
use super::values::cl_type;

/// JIT compilation context: owns the module and the declared-function cache.
pub struct JitContext {
    pub module: JITModule,
    pub func_registry: CodegenFnRegistry,
    func_ids: FxHashMap<String, FuncId>,
}

impl JitContext {
    pub fn new() -> Result<Self, CodegenError> {
        let mut flag_builder = settings::builder();
        flag_builder
            .set("use_colocated_libcalls", "false")
            .map_err(|e| CodegenError::Internal(e.to_string()))?;
        flag_builder
            .set("is_pic", "false")
            .map_err(|e| CodegenError::Internal(e.to_string()))?;

        let isa_builder = cranelift_native::builder()
            .map_err(|msg| CodegenError::Internal(format!("native ISA not available: {msg}")))?;
        let isa = isa_builder
            .finish(settings::Flags::new(flag_builder))
            .map_err(|e| CodegenError::Internal(e.to_string()))?;

        let mut builder = JITBuilder::with_isa(isa, cranelift_module::default_libcall_names());
        builder.symbol(
            RuntimeFn::StringConcat.symbol(),
            runtime::spice_string_concat as *const u8,
        );
        builder.symbol(
            RuntimeFn::StringRepeat.symbol(),
            runtime::spice_string_repeat as *const u8,
        );
        builder.symbol(
            RuntimeFn::StringEq.symbol(),
            runtime::spice_string_eq as *const u8,
        );

        Ok(Self {
            module: JITModule::new(builder),
            func_registry: CodegenFnRegistry::new(),
            func_ids: FxHashMap::default(),
        })
    }

    pub fn pointer_type(&self) -> Type {
        self.module.target_config().pointer_type()
    }

    /// Compile one function. The closure receives the selection context and
    /// the entry block's parameter values, and returns the value to return
    /// (None for a void function).
    pub fn compile_function<F>(
        &mut self,
        name: &str,
        params: &[QualType],
        ret: Option<QualType>,
        sema: &SemaRefs,
        build: F,
    ) -> Result<FuncId, CodegenError>
    where
        F: FnOnce(&mut Cg, &[Value]) -> Result<Option<Value>, CodegenError>,
    {
        let ptr_ty = self.pointer_type();
        let mut sig = self.module.make_signature();
        for param in params {
            sig.params
                .push(AbiParam::new(cl_type(sema.types, *param, ptr_ty)));
        }
        if let Some(ret_ty) = ret {
            sig.returns
                .push(AbiParam::new(cl_type(sema.types, ret_ty, ptr_ty)));
        }

        let func_id = self
            .module
            .declare_function(name, Linkage::Export, &sig)?;

        let mut ctx = self.module.make_context();
        ctx.func.signature = sig;
        let mut builder_ctx = FunctionBuilderContext::new();

        {
            let mut builder = FunctionBuilder::new(&mut ctx.func, &mut builder_ctx);
            let entry = builder.create_block();
            builder.append_block_params_for_function_params(entry);
            builder.switch_to_block(entry);
            builder.seal_block(entry);
            let param_values: Vec<Value> = builder.block_params(entry).to_vec();

            let mut compile_ctx = CompileCtx {
                sema,
                module: &mut self.module,
                func_registry: &mut self.func_registry,
                pointer_type: ptr_ty,
            };
            let mut cg = Cg {
                builder,
                ctx: &mut compile_ctx,
            };
            match build(&mut cg, &param_values)? {
                Some(value) => {
                    cg.builder.ins().return_(&[value]);
                }
                None => {
                    cg.builder.ins().return_(&[]);
                }
            }
            cg.builder.finalize();
        }

        self.module.define_function(func_id, &mut ctx)?;
        self.module.clear_context(&mut ctx);
        self.func_ids.insert(name.to_string(), func_id);
        Ok(func_id)
    }

    /// Resolve relocations and make compiled code callable.
    pub fn finalize(&mut self) -> Result<(), CodegenError> {
        self.module
            .finalize_definitions()
            .map_err(CodegenError::from)
    }

    pub fn function_ptr(&self, func_id: FuncId) -> *const u8 {
        self.module.get_finalized_function(func_id)
    }

    pub fn func_id(&self, name: &str) -> Option<FuncId> {
        self.func_ids.get(name).copied()
    }
}
