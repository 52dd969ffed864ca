// src/codegen/function_registry.rs
//
// Lazy declaration of callable functions in the JIT module: runtime support
// functions (imported by symbol name) and user operator overloads (declared by
// their mangled name). Each is declared once and the FuncId cached.

use cranelift::prelude::*;
use cranelift_jit::JITModule;
use cranelift_module::{FuncId, Linkage, Module};
use rustc_hash::FxHashMap;

use crate::errors::CodegenError;
use crate::sema::{FunctionId, FunctionRegistry, SuperType, TypeRegistry};

use super::values::cl_type;

/// Runtime support functions backing string operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeFn {
    StringConcat,
    StringRepeat,
    StringEq,
}

impl RuntimeFn {
    pub fn symbol(&self) -> &'static str {
        match self {
            RuntimeFn::StringConcat => "spice_string_concat",
            RuntimeFn::StringRepeat => "spice_string_repeat",
            RuntimeFn::StringEq => "spice_string_eq",
        }
    }

    fn signature(&self, module: &JITModule) -> Signature {
        let ptr_ty = module.target_config().pointer_type();
        let mut sig = module.make_signature();
        match self {
            RuntimeFn::StringConcat => {
                sig.params.push(AbiParam::new(ptr_ty));
                sig.params.push(AbiParam::new(ptr_ty));
                sig.returns.push(AbiParam::new(ptr_ty));
            }
            RuntimeFn::StringRepeat => {
                sig.params.push(AbiParam::new(ptr_ty));
                sig.params.push(AbiParam::new(types::I64));
                sig.returns.push(AbiParam::new(ptr_ty));
            }
            RuntimeFn::StringEq => {
                sig.params.push(AbiParam::new(ptr_ty));
                sig.params.push(AbiParam::new(ptr_ty));
                sig.returns.push(AbiParam::new(types::I8));
            }
        }
        sig
    }
}

#[derive(Default)]
pub struct CodegenFnRegistry {
    runtime_ids: FxHashMap<RuntimeFn, FuncId>,
    overload_ids: FxHashMap<FunctionId, FuncId>,
}

impl CodegenFnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// FuncId of a runtime support function, declaring the import on first use.
    pub fn runtime_id(
        &mut self,
        module: &mut JITModule,
        runtime_fn: RuntimeFn,
    ) -> Result<FuncId, CodegenError> {
        if let Some(&id) = self.runtime_ids.get(&runtime_fn) {
            return Ok(id);
        }
        let sig = runtime_fn.signature(module);
        let id = module.declare_function(runtime_fn.symbol(), Linkage::Import, &sig)?;
        self.runtime_ids.insert(runtime_fn, id);
        Ok(id)
    }

    /// FuncId of a user operator overload, declaring it by mangled name on
    /// first use. The signature is derived from the checked function record:
    /// by-reference parameters become pointers.
    pub fn overload_id(
        &mut self,
        module: &mut JITModule,
        callee: FunctionId,
        functions: &FunctionRegistry,
        types: &TypeRegistry,
    ) -> Result<FuncId, CodegenError> {
        if let Some(&id) = self.overload_ids.get(&callee) {
            return Ok(id);
        }
        let ptr_ty = module.target_config().pointer_type();
        let function = functions.get(callee);
        let mut sig = module.make_signature();
        for param in &function.params {
            sig.params.push(AbiParam::new(cl_type(types, *param, ptr_ty)));
        }
        if !function.is_procedure
            && !function.return_type.is(types, SuperType::Dyn)
        {
            sig.returns
                .push(AbiParam::new(cl_type(types, function.return_type, ptr_ty)));
        }
        let id = module.declare_function(&function.name, Linkage::Export, &sig)?;
        self.overload_ids.insert(callee, id);
        Ok(id)
    }
}
