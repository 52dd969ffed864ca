// src/sema/overload.rs
//
// Operator-overload resolution. Candidates are searched in the current file
// first, then in its imports; imported overloads must be public. A hit is
// recorded in the node's overload slots keyed by (man_idx, op_idx) so the
// instruction selector finds the same callee later without re-resolving.

use tracing::trace;

use crate::errors::SemanticError;
use crate::frontend::{OpFctSlots, Span};

use super::check::{ExprResult, TypeChecker};
use super::scope::anonymous_symbol_name;
use super::types::QualType;

pub const OP_FCT_PLUS: &str = "op.plus";
pub const OP_FCT_MINUS: &str = "op.minus";
pub const OP_FCT_MUL: &str = "op.mul";
pub const OP_FCT_DIV: &str = "op.div";
pub const OP_FCT_EQUAL: &str = "op.equals";
pub const OP_FCT_NOT_EQUAL: &str = "op.notequals";
pub const OP_FCT_SHL: &str = "op.shl";
pub const OP_FCT_SHR: &str = "op.shr";
pub const OP_FCT_PLUS_EQUAL: &str = "op.plusequals";
pub const OP_FCT_MINUS_EQUAL: &str = "op.minusequals";
pub const OP_FCT_MUL_EQUAL: &str = "op.mulequals";
pub const OP_FCT_DIV_EQUAL: &str = "op.divequals";
pub const OP_FCT_POSTFIX_PLUS_PLUS: &str = "op.plusplus.post";
pub const OP_FCT_POSTFIX_MINUS_MINUS: &str = "op.minusminus.post";

/// Name of the copy constructor looked up on struct assignment.
pub const CTOR_FUNCTION_NAME: &str = "ctor";

impl TypeChecker {
    /// Try to resolve `fct_name` against user-defined overloads for the given
    /// operand types. Returns Ok(None) when no overload exists (the caller
    /// falls through to the built-in rule tables), Ok(Some) when one was
    /// resolved and recorded, and Err on a visibility violation.
    pub fn resolve_operator_overload(
        &mut self,
        slots: &mut OpFctSlots,
        span: Span,
        fct_name: &str,
        operands: &[&ExprResult],
        op_idx: usize,
    ) -> Result<Option<ExprResult>, SemanticError> {
        let args: Vec<QualType> = operands.iter().map(|o| o.ty).collect();

        let mut search: Vec<(super::scope::FileId, bool)> = vec![(self.current_file, false)];
        for import in &self.file(self.current_file).imports {
            search.push((*import, true));
        }

        for (file_id, imported) in search {
            let record = self.file(file_id);
            // Cheap pre-filter: most files define no overloads at all.
            if !record.exported_names.contains(fct_name) {
                continue;
            }
            let Some(callee) =
                self.functions
                    .match_in_file(&record.functions, fct_name, &args, &self.types)
            else {
                continue;
            };

            let function = self.functions.get(callee);
            let is_public = function.is_public;
            let body_checked = function.body_checked;
            let is_procedure = function.is_procedure;
            let return_type = function.return_type;
            let signature = function.signature(&self.types);

            if imported && !is_public {
                return Err(SemanticError::InsufficientVisibility {
                    signature,
                    span: span.into(),
                });
            }

            if !body_checked {
                // The callee's return type is not final until its body has been
                // checked; schedule another sweep over the caller.
                self.revisit_requested = true;
            }

            slots.record(self.man_idx, op_idx, callee);
            trace!(overload = %signature, op_idx, "resolved operator overload");

            // Procedures have no return value; the expression yields a plain
            // bool so operator chaining stays well-typed.
            let result_ty = if is_procedure {
                self.types.qt(super::types::SuperType::Bool)
            } else {
                return_type
            };

            return Ok(Some(self.tracked_result(result_ty, span, op_idx)));
        }

        Ok(None)
    }

    /// Wrap an overload result. Struct values that need destructor insertion
    /// get an anonymous scope entry so the lifetime pass sees them; the entry
    /// name is reproducible from span and operator index, which keeps repeated
    /// sweeps idempotent and lets codegen find the same entry.
    fn tracked_result(&mut self, ty: QualType, span: Span, op_idx: usize) -> ExprResult {
        let needs_tracking = self
            .types
            .struct_id(ty.ty)
            .map(|sid| !self.types.struct_def(sid).trivially_destructible)
            .unwrap_or(false);
        if !needs_tracking {
            return ExprResult::new(ty);
        }
        let name = anonymous_symbol_name(span, op_idx);
        let entry = self
            .current_scope
            .insert_anonymous(&mut self.symbols, &name, ty);
        ExprResult::with_entry(ty, entry)
    }

    /// Copy constructor for a struct type, if one is declared in the file that
    /// can see the type.
    pub fn lookup_copy_ctor(&self, ty: QualType) -> Option<super::functions::FunctionId> {
        self.types.struct_id(ty.ty)?;
        let record = self.file(self.current_file);
        if !record.exported_names.contains(CTOR_FUNCTION_NAME) {
            return None;
        }
        self.functions
            .match_in_file(&record.functions, CTOR_FUNCTION_NAME, &[ty], &self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sema::functions::Function;
    use crate::sema::scope::FileId;
    use crate::sema::type_registry::StructDef;
    use crate::sema::types::SuperType;
    use smallvec::smallvec;

    fn checker_with_overload(is_public: bool, body_checked: bool) -> (TypeChecker, FileId) {
        let mut checker = TypeChecker::new();
        let file = checker.current_file;
        let int = checker.types.qt(SuperType::Int);
        checker.register_function(
            file,
            Function {
                name: OP_FCT_PLUS.to_string(),
                params: smallvec![int, int],
                return_type: checker.types.qt(SuperType::Long),
                is_procedure: false,
                is_public,
                body_checked,
                file,
            },
        );
        (checker, file)
    }

    #[test]
    fn overload_takes_precedence_and_records_slot() {
        let (mut checker, _) = checker_with_overload(true, true);
        let int = checker.types.qt(SuperType::Int);
        let mut slots = OpFctSlots::default();
        let lhs = ExprResult::new(int);
        let rhs = ExprResult::new(int);
        let result = checker
            .resolve_operator_overload(&mut slots, Span::new(0, 3), OP_FCT_PLUS, &[&lhs, &rhs], 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Long);
        assert!(slots.get(0, 0).is_some());
        assert!(!checker.revisit_requested);
    }

    #[test]
    fn no_overload_falls_through() {
        let mut checker = TypeChecker::new();
        let int = checker.types.qt(SuperType::Int);
        let mut slots = OpFctSlots::default();
        let lhs = ExprResult::new(int);
        let rhs = ExprResult::new(int);
        let result = checker
            .resolve_operator_overload(&mut slots, Span::new(0, 3), OP_FCT_PLUS, &[&lhs, &rhs], 0)
            .unwrap();
        assert!(result.is_none());
        assert!(slots.is_empty());
    }

    #[test]
    fn unchecked_body_requests_revisit() {
        let (mut checker, _) = checker_with_overload(true, false);
        let int = checker.types.qt(SuperType::Int);
        let mut slots = OpFctSlots::default();
        let lhs = ExprResult::new(int);
        let rhs = ExprResult::new(int);
        checker
            .resolve_operator_overload(&mut slots, Span::new(0, 3), OP_FCT_PLUS, &[&lhs, &rhs], 0)
            .unwrap();
        assert!(checker.revisit_requested);
    }

    #[test]
    fn imported_private_overload_is_a_visibility_error() {
        let mut checker = TypeChecker::new();
        let dep = checker.add_file("dep");
        let int = checker.types.qt(SuperType::Int);
        checker.register_function(
            dep,
            Function {
                name: OP_FCT_PLUS.to_string(),
                params: smallvec![int, int],
                return_type: int,
                is_procedure: false,
                is_public: false,
                body_checked: true,
                file: dep,
            },
        );
        let main = checker.current_file;
        checker.file_mut(main).imports.push(dep);

        let mut slots = OpFctSlots::default();
        let lhs = ExprResult::new(int);
        let rhs = ExprResult::new(int);
        let err = checker
            .resolve_operator_overload(&mut slots, Span::new(0, 3), OP_FCT_PLUS, &[&lhs, &rhs], 0)
            .unwrap_err();
        assert!(matches!(err, SemanticError::InsufficientVisibility { .. }));
    }

    #[test]
    fn procedure_overload_yields_bool() {
        let mut checker = TypeChecker::new();
        let file = checker.current_file;
        let int = checker.types.qt(SuperType::Int);
        checker.register_function(
            file,
            Function {
                name: OP_FCT_PLUS_EQUAL.to_string(),
                params: smallvec![int, int],
                return_type: checker.types.qt(SuperType::Dyn),
                is_procedure: true,
                is_public: true,
                body_checked: true,
                file,
            },
        );
        let mut slots = OpFctSlots::default();
        let lhs = ExprResult::new(int);
        let rhs = ExprResult::new(int);
        let result = checker
            .resolve_operator_overload(
                &mut slots,
                Span::new(0, 3),
                OP_FCT_PLUS_EQUAL,
                &[&lhs, &rhs],
                0,
            )
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Bool);
    }

    #[test]
    fn struct_result_gets_anonymous_tracking_entry() {
        let mut checker = TypeChecker::new();
        let file = checker.current_file;
        let (_, vec3_ty) = checker.types.register_struct(StructDef {
            name: "Vec3".to_string(),
            implements: vec![],
            trivially_destructible: false,
        });
        let vec3 = crate::sema::types::QualType::new(vec3_ty);
        checker.register_function(
            file,
            Function {
                name: OP_FCT_PLUS.to_string(),
                params: smallvec![vec3, vec3],
                return_type: vec3,
                is_procedure: false,
                is_public: true,
                body_checked: true,
                file,
            },
        );
        let mut slots = OpFctSlots::default();
        let lhs = ExprResult::new(vec3);
        let rhs = ExprResult::new(vec3);
        let span = Span::new(17, 5);

        let first = checker
            .resolve_operator_overload(&mut slots, span, OP_FCT_PLUS, &[&lhs, &rhs], 2)
            .unwrap()
            .unwrap();
        let entry = first.entry.expect("tracked entry");
        assert!(checker.symbols.is_anonymous(entry));
        assert_eq!(checker.symbols.get(entry).name, "anon.17.2");

        // Second sweep reuses the same entry.
        let second = checker
            .resolve_operator_overload(&mut slots, span, OP_FCT_PLUS, &[&lhs, &rhs], 2)
            .unwrap()
            .unwrap();
        assert_eq!(second.entry, Some(entry));
    }
}
