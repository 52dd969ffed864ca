// src/codegen/values.rs
//
// Compiled expression values with lazy, memoized resolution. An operand can be
// materialized as an SSA value, as an address, or known as a constant; the
// selector asks for the form it needs and the answer is cached so repeated
// resolution never re-emits instructions.

use cranelift::prelude::*;

use crate::sema::{QualType, SuperType, SymbolId, TypeRegistry};

/// A compiled expression operand. Exactly one of value/addr/constant is set at
/// creation; the others are filled in on demand.
#[derive(Clone)]
pub struct ExprValue {
    value: Option<Value>,
    addr: Option<Value>,
    constant: Option<i64>,
    pub ty: QualType,
    pub entry: Option<SymbolId>,
}

impl ExprValue {
    pub fn from_value(value: Value, ty: QualType) -> Self {
        Self {
            value: Some(value),
            addr: None,
            constant: None,
            ty,
            entry: None,
        }
    }

    pub fn from_addr(addr: Value, ty: QualType) -> Self {
        Self {
            value: None,
            addr: Some(addr),
            constant: None,
            ty,
            entry: None,
        }
    }

    pub fn from_const(constant: i64, ty: QualType) -> Self {
        Self {
            value: None,
            addr: None,
            constant: Some(constant),
            ty,
            entry: None,
        }
    }

    pub fn with_entry(mut self, entry: Option<SymbolId>) -> Self {
        self.entry = entry;
        self
    }

    pub fn has_addr(&self) -> bool {
        self.addr.is_some()
    }

    /// Materialize as an SSA value: cached value, or an iconst for constants,
    /// or a load through the address.
    pub fn resolve_value(
        &mut self,
        builder: &mut FunctionBuilder,
        types: &TypeRegistry,
        ptr_ty: Type,
    ) -> Value {
        if let Some(value) = self.value {
            return value;
        }
        let cl_ty = cl_type(types, self.ty, ptr_ty);
        let value = if let Some(constant) = self.constant {
            if cl_ty == types::F64 {
                builder.ins().f64const(constant as f64)
            } else {
                builder.ins().iconst(cl_ty, constant)
            }
        } else if let Some(addr) = self.addr {
            builder.ins().load(cl_ty, MemFlags::new(), addr, 0)
        } else {
            // Unreachable by construction; keep codegen total.
            builder.ins().iconst(cl_ty, 0)
        };
        self.value = Some(value);
        value
    }

    /// Materialize as an address. Values without one are spilled to a fresh
    /// stack slot; the slot is cached so the address stays stable.
    pub fn resolve_addr(
        &mut self,
        builder: &mut FunctionBuilder,
        types: &TypeRegistry,
        ptr_ty: Type,
    ) -> Value {
        if let Some(addr) = self.addr {
            return addr;
        }
        let cl_ty = cl_type(types, self.ty, ptr_ty);
        let value = self.resolve_value(builder, types, ptr_ty);
        let slot = builder.create_sized_stack_slot(StackSlotData::new(
            StackSlotKind::ExplicitSlot,
            cl_ty.bytes(),
            0,
        ));
        builder.ins().stack_store(value, slot, 0);
        let addr = builder.ins().stack_addr(ptr_ty, slot, 0);
        self.addr = Some(addr);
        addr
    }

    /// Store a new value through the operand's address, refreshing the cached
    /// value. The operand must have been resolved as an address first.
    pub fn store(&mut self, builder: &mut FunctionBuilder, value: Value) {
        if let Some(addr) = self.addr {
            builder.ins().store(MemFlags::new(), value, addr, 0);
        }
        self.value = Some(value);
        self.constant = None;
    }
}

/// Map a qualified type to its Cranelift representation. Everything indirect
/// (strings, pointers, references, arrays, aggregates, function values) is a
/// native pointer.
pub fn cl_type(types: &TypeRegistry, qt: QualType, ptr_ty: Type) -> Type {
    match qt.super_type(types) {
        SuperType::Double => types::F64,
        SuperType::Int => types::I32,
        SuperType::Short => types::I16,
        SuperType::Long => types::I64,
        SuperType::Byte | SuperType::Char | SuperType::Bool => types::I8,
        _ => ptr_ty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_type_mapping() {
        let mut types = TypeRegistry::new();
        let ptr_ty = types::I64;
        assert_eq!(cl_type(&types, types.qt(SuperType::Double), ptr_ty), types::F64);
        assert_eq!(cl_type(&types, types.qt(SuperType::Int), ptr_ty), types::I32);
        assert_eq!(cl_type(&types, types.qt(SuperType::Short), ptr_ty), types::I16);
        assert_eq!(cl_type(&types, types.qt(SuperType::Long), ptr_ty), types::I64);
        assert_eq!(cl_type(&types, types.qt(SuperType::Byte), ptr_ty), types::I8);
        assert_eq!(cl_type(&types, types.qt(SuperType::Bool), ptr_ty), types::I8);
        assert_eq!(cl_type(&types, types.qt(SuperType::String), ptr_ty), ptr_ty);
        let int = types.primitive(SuperType::Int);
        let p = QualType::new(types.ptr_to(int));
        assert_eq!(cl_type(&types, p, ptr_ty), ptr_ty);
    }
}
