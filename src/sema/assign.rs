// src/sema/assign.rs
//
// Assignment compatibility. Applied to declarations, plain assignments, call
// argument binding, return-value binding, and field assignments. The ladder is
// ordered: special shapes (dyn, references, pointers, arrays, interfaces,
// structs) are handled before falling back to the primitive assignment table.

use tracing::trace;

use crate::errors::SemanticError;
use crate::frontend::AssignNode;

use super::check::{ExprResult, TypeChecker};
use super::functions::FunctionId;
use super::op_rules::{match_binary, ASSIGN_OP_RULES};
use super::type_registry::TypeKind;
use super::types::{QualType, SuperType};

/// Where an assignment occurs. Declarations may write const targets; returns
/// enable named-return-value elision and temporary-escape checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignContext {
    pub is_decl: bool,
    pub is_return: bool,
    pub is_field: bool,
}

impl AssignContext {
    pub fn decl() -> Self {
        Self {
            is_decl: true,
            ..Self::default()
        }
    }

    pub fn ret() -> Self {
        Self {
            is_return: true,
            ..Self::default()
        }
    }

    pub fn field() -> Self {
        Self {
            is_field: true,
            ..Self::default()
        }
    }
}

impl TypeChecker {
    pub fn check_assign(
        &mut self,
        node: &AssignNode,
        lhs: &ExprResult,
        rhs: &ExprResult,
        ctx: AssignContext,
    ) -> Result<Option<(QualType, Option<FunctionId>)>, SemanticError> {
        self.check_assign_with_prefix(node, lhs, rhs, ctx, "cannot assign")
    }

    /// Field assignments bind immediates to const references and always copy
    /// structs through their constructor when one exists.
    pub fn check_field_assign(
        &mut self,
        node: &AssignNode,
        lhs: &ExprResult,
        rhs: &ExprResult,
    ) -> Result<Option<(QualType, Option<FunctionId>)>, SemanticError> {
        self.check_assign_with_prefix(node, lhs, rhs, AssignContext::field(), "cannot initialize field")
    }

    pub fn check_assign_with_prefix(
        &mut self,
        node: &AssignNode,
        lhs: &ExprResult,
        rhs: &ExprResult,
        ctx: AssignContext,
        error_prefix: &str,
    ) -> Result<Option<(QualType, Option<FunctionId>)>, SemanticError> {
        let lhs_ty = lhs.ty;
        let rhs_ty = rhs.ty.strip_ref(&self.types);

        // dyn declarations take the rhs type wholesale.
        if lhs_ty.is(&self.types, SuperType::Dyn) {
            let mut inferred = rhs_ty;
            inferred.qualifiers.is_const = lhs_ty.qualifiers.is_const;
            return Ok(Some((inferred, None)));
        }

        if !ctx.is_decl && !ctx.is_return && !ctx.is_field && lhs.entry.is_none() {
            self.soft_error(
                SemanticError::OperatorWrongDataType {
                    message: format!("{} to a temporary value", error_prefix),
                    span: node.span.into(),
                },
                node.span,
            );
            return Ok(None);
        }

        if !ctx.is_decl && !ctx.is_return && !ctx.is_field && lhs_ty.qualifiers.is_const {
            let name = lhs
                .entry
                .map(|id| self.symbols.get(id).name.clone())
                .unwrap_or_else(|| "<expr>".to_string());
            self.soft_error(
                SemanticError::ReassignConstVariable {
                    name,
                    span: node.span.into(),
                },
                node.span,
            );
        }

        // Reference targets bind the rhs instead of copying it.
        if lhs_ty.is_ref(&self.types) {
            return self.bind_reference(node, lhs_ty, rhs, rhs_ty, ctx);
        }

        // Exact structural match. Structs additionally copy through their
        // constructor; a returned temporary elides the copy (the value is
        // constructed in place).
        if lhs_ty.ty == rhs_ty.ty {
            self.track_heap_move(lhs_ty, rhs, rhs_ty);
            let ctor = self.struct_copy_ctor(lhs_ty, rhs, ctx);
            let mut result = rhs_ty;
            result.qualifiers = lhs_ty.qualifiers;
            return Ok(Some((result, ctor)));
        }

        // Remaining cross-type compatibilities.
        if self.assign_compatible(lhs_ty, rhs_ty) {
            trace!(
                lhs = %self.display(lhs_ty),
                rhs = %self.display(rhs_ty),
                "cross-type assignment accepted"
            );
            self.track_heap_move(lhs_ty, rhs, rhs_ty);
            let mut result = lhs_ty;
            result.qualifiers.is_heap = rhs_ty.qualifiers.is_heap && lhs_ty.qualifiers.is_heap;
            return Ok(Some((result, None)));
        }

        // Primitive fallback through the assignment table.
        let lhs_super = lhs_ty.super_type(&self.types);
        let rhs_super = rhs_ty.super_type(&self.types);
        if let Some(rule) = match_binary(ASSIGN_OP_RULES, lhs_super, rhs_super) {
            let mut result = self.types.qt(rule.result);
            result.qualifiers = lhs_ty.qualifiers;
            return Ok(Some((result, None)));
        }

        self.soft_error(
            SemanticError::OperatorWrongDataType {
                message: format!(
                    "{}: {} is not compatible with {}",
                    error_prefix,
                    self.display(rhs_ty),
                    self.display(lhs_ty)
                ),
                span: node.span.into(),
            },
            node.span,
        );
        Ok(None)
    }

    fn bind_reference(
        &mut self,
        node: &AssignNode,
        lhs_ty: QualType,
        rhs: &ExprResult,
        rhs_ty: QualType,
        ctx: AssignContext,
    ) -> Result<Option<(QualType, Option<FunctionId>)>, SemanticError> {
        let Some(inner) = lhs_ty.contained(&self.types) else {
            return Ok(None);
        };
        if !inner.matches(&rhs_ty, true) {
            self.soft_error(
                SemanticError::OperatorWrongDataType {
                    message: format!(
                        "cannot bind {} to a reference to {}",
                        self.display(rhs_ty),
                        self.display(inner)
                    ),
                    span: node.span.into(),
                },
                node.span,
            );
            return Ok(None);
        }
        if rhs.is_temporary(&self.symbols) {
            // Escaping a temporary through a reference is always a hard error;
            // field initializers may still bind immediates to const refs.
            if ctx.is_return {
                return Err(SemanticError::ReturnOfTemporaryValue {
                    span: node.span.into(),
                });
            }
            if !inner.qualifiers.is_const && !ctx.is_field {
                return Err(SemanticError::TempToNonConstRef {
                    span: node.span.into(),
                });
            }
        }
        Ok(Some((lhs_ty, None)))
    }

    /// Assigning an owning pointer transfers ownership: the rhs binding is
    /// marked moved so the lifetime pass stops tracking it.
    fn track_heap_move(&mut self, lhs_ty: QualType, rhs: &ExprResult, rhs_ty: QualType) {
        if lhs_ty.qualifiers.is_heap && rhs_ty.qualifiers.is_heap {
            if let Some(entry) = rhs.entry {
                self.symbols.mark_moved(entry);
            }
        }
    }

    fn struct_copy_ctor(
        &self,
        lhs_ty: QualType,
        rhs: &ExprResult,
        ctx: AssignContext,
    ) -> Option<FunctionId> {
        if self.types.struct_id(lhs_ty.ty).is_none() {
            return None;
        }
        // Returned temporaries are constructed in place, no copy needed.
        // Field assignment copies unconditionally.
        if !ctx.is_field && ctx.is_return && rhs.is_temporary(&self.symbols) {
            return None;
        }
        self.lookup_copy_ctor(lhs_ty.with_const(false))
    }

    /// Cross-type shapes accepted without a table row: string decay into
    /// char*, array decay into a pointer, struct pointers into interface
    /// pointers of equal depth, and heap pointers into non-owning pointers.
    fn assign_compatible(&self, lhs_ty: QualType, rhs_ty: QualType) -> bool {
        // string -> char*
        if let TypeKind::Ptr(inner) = self.types.kind(lhs_ty.ty) {
            if self.types.super_type(*inner) == SuperType::Char
                && rhs_ty.is(&self.types, SuperType::String)
            {
                return true;
            }
        }

        // T[] -> T*
        if lhs_ty.is_ptr(&self.types)
            && rhs_ty.is_array(&self.types)
            && self.types.contained(lhs_ty.ty) == self.types.contained(rhs_ty.ty)
        {
            return true;
        }

        // Struct (pointer chain) -> interface (pointer chain) of equal depth.
        let (lhs_depth, lhs_base) = lhs_ty.ptr_depth(&self.types);
        let (rhs_depth, rhs_base) = rhs_ty.ptr_depth(&self.types);
        if lhs_depth == rhs_depth {
            if let (Some(iid), Some(sid)) = (
                self.types.interface_id(lhs_base.ty),
                self.types.struct_id(rhs_base.ty),
            ) {
                if self.types.struct_implements(sid, iid) {
                    return true;
                }
            }
        }

        // heap T* -> non-owning T*
        if !lhs_ty.qualifiers.is_heap && rhs_ty.qualifiers.is_heap && lhs_ty.ty == rhs_ty.ty {
            return true;
        }

        false
    }
}
