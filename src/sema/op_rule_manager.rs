// src/sema/op_rule_manager.rs
//
// Operator type checks. Each check tries user overloads first, then consults
// the operator's rule table. Unsafe rows outside an unsafe block and compound
// assignments to const lvalues are soft errors; a combination with no row is a
// soft error too, yielding no result.

use tracing::trace;

use crate::errors::SemanticError;
use crate::frontend::{BinaryOpNode, CastNode, UnaryOpNode};

use super::check::{ExprResult, TypeChecker};
use super::op_rules::{
    binary_result_type, match_binary, match_unary, unary_result_type, BinOp, UnOp, CAST_OP_RULES,
};
use super::types::QualType;

impl TypeChecker {
    /// Check a binary operator application. `op_idx` numbers the operator
    /// occurrence within the current function, for overload slot keying.
    pub fn check_binary(
        &mut self,
        node: &mut BinaryOpNode,
        op: BinOp,
        lhs: &ExprResult,
        rhs: &ExprResult,
        op_idx: usize,
    ) -> Result<Option<ExprResult>, SemanticError> {
        if let Some(fct_name) = op.overload_name() {
            if let Some(result) =
                self.resolve_operator_overload(&mut node.op_fct, node.span, fct_name, &[lhs, rhs], op_idx)?
            {
                return Ok(Some(result));
            }
        }

        let lhs_ty = lhs.ty.strip_ref(&self.types);
        let rhs_ty = rhs.ty.strip_ref(&self.types);
        let lhs_super = lhs_ty.super_type(&self.types);
        let rhs_super = rhs_ty.super_type(&self.types);

        let Some(rule) = match_binary(op.rules(), lhs_super, rhs_super) else {
            let message = format!(
                "cannot apply operator '{}' to {}",
                op.symbol(),
                self.display_pair(lhs_ty, rhs_ty)
            );
            self.soft_error(
                SemanticError::OperatorWrongDataType {
                    message,
                    span: node.span.into(),
                },
                node.span,
            );
            return Ok(None);
        };
        trace!(op = op.symbol(), ?lhs_super, ?rhs_super, low_op = ?rule.low_op, "matched rule");

        if rule.unsafe_op && !self.in_unsafe_block {
            let message = format!(
                "operator '{}' on {}",
                op.symbol(),
                self.display_pair(lhs_ty, rhs_ty)
            );
            self.soft_error(
                SemanticError::UnsafeOperationInSafeContext {
                    message,
                    span: node.span.into(),
                },
                node.span,
            );
        }

        let compound = op.is_compound_assign();
        if compound && lhs_ty.qualifiers.is_const {
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

        let result = binary_result_type(rule, lhs_ty, rhs_ty, compound, &self.types);
        // Compound assignments write through the lhs lvalue; the result stays
        // addressable via the same entry.
        Ok(Some(if compound {
            ExprResult {
                ty: result,
                entry: lhs.entry,
            }
        } else {
            ExprResult::new(result)
        }))
    }

    pub fn check_unary(
        &mut self,
        node: &mut UnaryOpNode,
        op: UnOp,
        operand: &ExprResult,
        op_idx: usize,
    ) -> Result<Option<ExprResult>, SemanticError> {
        if let Some(fct_name) = op.overload_name() {
            if let Some(result) =
                self.resolve_operator_overload(&mut node.op_fct, node.span, fct_name, &[operand], op_idx)?
            {
                return Ok(Some(result));
            }
        }

        let operand_ty = operand.ty.strip_ref(&self.types);
        let operand_super = operand_ty.super_type(&self.types);

        let Some(rule) = match_unary(op.rules(), operand_super) else {
            let message = format!(
                "cannot apply operator '{}' to {}",
                op.symbol(),
                self.display(operand_ty)
            );
            self.soft_error(
                SemanticError::OperatorWrongDataType {
                    message,
                    span: node.span.into(),
                },
                node.span,
            );
            return Ok(None);
        };

        if rule.unsafe_op && !self.in_unsafe_block {
            let message = format!("operator '{}' on {}", op.symbol(), self.display(operand_ty));
            self.soft_error(
                SemanticError::UnsafeOperationInSafeContext {
                    message,
                    span: node.span.into(),
                },
                node.span,
            );
        }

        let result = unary_result_type(rule, operand_ty, &self.types);
        // Increments and decrements mutate through the operand's lvalue.
        Ok(Some(if op.is_increment_decrement() {
            ExprResult {
                ty: result,
                entry: operand.entry,
            }
        } else {
            ExprResult::new(result)
        }))
    }

    /// Check an explicit cast from `rhs` to `target`. Identity casts pass the
    /// operand through untouched, preserving its entry and qualifiers.
    pub fn check_cast(
        &mut self,
        node: &CastNode,
        target: QualType,
        rhs: &ExprResult,
    ) -> Result<Option<ExprResult>, SemanticError> {
        let rhs_ty = rhs.ty.strip_ref(&self.types);
        if target.ty == rhs_ty.ty {
            return Ok(Some(*rhs));
        }

        let target_super = target.super_type(&self.types);
        let rhs_super = rhs_ty.super_type(&self.types);

        let Some(rule) = match_binary(CAST_OP_RULES, target_super, rhs_super) else {
            let message = format!(
                "cannot cast {} to {}",
                self.display(rhs_ty),
                self.display(target)
            );
            self.soft_error(
                SemanticError::OperatorWrongDataType {
                    message,
                    span: node.span.into(),
                },
                node.span,
            );
            return Ok(None);
        };

        if rule.unsafe_op && !self.in_unsafe_block {
            let message = format!(
                "cast from {} to {}",
                self.display(rhs_ty),
                self.display(target)
            );
            self.soft_error(
                SemanticError::UnsafeOperationInSafeContext {
                    message,
                    span: node.span.into(),
                },
                node.span,
            );
        }

        Ok(Some(ExprResult::new(target.with_const(false))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Span;
    use crate::sema::types::SuperType;

    fn new_binary_node() -> BinaryOpNode {
        BinaryOpNode::new(Span::new(0, 5))
    }

    #[test]
    fn int_plus_double_promotes_to_double() {
        let mut checker = TypeChecker::new();
        let mut node = new_binary_node();
        let lhs = ExprResult::new(checker.types.qt(SuperType::Int));
        let rhs = ExprResult::new(checker.types.qt(SuperType::Double));
        let result = checker
            .check_binary(&mut node, BinOp::Plus, &lhs, &rhs, 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Double);
        assert!(checker.soft_errors().is_empty());
    }

    #[test]
    fn bool_plus_string_is_a_soft_error() {
        let mut checker = TypeChecker::new();
        let mut node = new_binary_node();
        let lhs = ExprResult::new(checker.types.qt(SuperType::Bool));
        let rhs = ExprResult::new(checker.types.qt(SuperType::String));
        let result = checker
            .check_binary(&mut node, BinOp::Plus, &lhs, &rhs, 0)
            .unwrap();
        assert!(result.is_none());
        let errors = checker.check_for_soft_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error,
            SemanticError::OperatorWrongDataType { .. }
        ));
    }

    #[test]
    fn pointer_arithmetic_outside_unsafe_is_soft_error() {
        let mut checker = TypeChecker::new();
        let int = checker.types.primitive(SuperType::Int);
        let ptr = QualType::new(checker.types.ptr_to(int));
        let mut node = new_binary_node();
        let lhs = ExprResult::new(ptr);
        let rhs = ExprResult::new(checker.types.qt(SuperType::Int));
        let result = checker
            .check_binary(&mut node, BinOp::Plus, &lhs, &rhs, 0)
            .unwrap()
            .unwrap();
        // The result type is still produced; the sweep just records the error.
        assert_eq!(result.ty.ty, ptr.ty);
        let errors = checker.check_for_soft_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error,
            SemanticError::UnsafeOperationInSafeContext { .. }
        ));

        // Inside an unsafe block the same combination is clean.
        checker.in_unsafe_block = true;
        checker
            .check_binary(&mut node, BinOp::Plus, &lhs, &rhs, 0)
            .unwrap()
            .unwrap();
        assert!(checker.soft_errors().is_empty());
    }

    #[test]
    fn compound_assign_to_const_is_soft_error_and_keeps_lhs_type() {
        let mut checker = TypeChecker::new();
        let short = checker.types.qt(SuperType::Short).with_const(true);
        let entry = checker.current_scope.insert(&mut checker.symbols, "s", short);
        let mut node = new_binary_node();
        let lhs = ExprResult::with_entry(short, entry);
        let rhs = ExprResult::new(checker.types.qt(SuperType::Int));
        let result = checker
            .check_binary(&mut node, BinOp::PlusEqual, &lhs, &rhs, 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Short);
        assert_eq!(result.entry, Some(entry));
        let errors = checker.check_for_soft_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error,
            SemanticError::ReassignConstVariable { ref name, .. } if name == "s"
        ));
    }

    #[test]
    fn refs_are_stripped_before_matching() {
        let mut checker = TypeChecker::new();
        let int = checker.types.primitive(SuperType::Int);
        let int_ref = QualType::new(checker.types.ref_to(int));
        let mut node = new_binary_node();
        let lhs = ExprResult::new(int_ref);
        let rhs = ExprResult::new(checker.types.qt(SuperType::Int));
        let result = checker
            .check_binary(&mut node, BinOp::Plus, &lhs, &rhs, 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Int);
    }

    #[test]
    fn comparison_yields_bool_temporary() {
        let mut checker = TypeChecker::new();
        let mut node = new_binary_node();
        let lhs = ExprResult::new(checker.types.qt(SuperType::Long));
        let rhs = ExprResult::new(checker.types.qt(SuperType::Int));
        let result = checker
            .check_binary(&mut node, BinOp::Less, &lhs, &rhs, 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Bool);
        assert!(result.is_temporary(&checker.symbols));
    }

    #[test]
    fn unary_minus_on_bool_rejected() {
        let mut checker = TypeChecker::new();
        let mut node = UnaryOpNode::new(Span::new(0, 2));
        let operand = ExprResult::new(checker.types.qt(SuperType::Bool));
        let result = checker
            .check_unary(&mut node, UnOp::PrefixMinus, &operand, 0)
            .unwrap();
        assert!(result.is_none());
        assert_eq!(checker.check_for_soft_errors().len(), 1);
    }

    #[test]
    fn postfix_increment_keeps_entry() {
        let mut checker = TypeChecker::new();
        let int = checker.types.qt(SuperType::Int);
        let entry = checker.current_scope.insert(&mut checker.symbols, "i", int);
        let mut node = UnaryOpNode::new(Span::new(0, 3));
        let operand = ExprResult::with_entry(int, entry);
        let result = checker
            .check_unary(&mut node, UnOp::PostfixPlusPlus, &operand, 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.entry, Some(entry));
    }

    #[test]
    fn identity_cast_passes_operand_through() {
        let mut checker = TypeChecker::new();
        let int = checker.types.qt(SuperType::Int).with_const(true);
        let entry = checker.current_scope.insert(&mut checker.symbols, "x", int);
        let node = CastNode::new(Span::new(0, 8));
        let rhs = ExprResult::with_entry(int, entry);
        let result = checker
            .check_cast(&node, checker.types.qt(SuperType::Int), &rhs)
            .unwrap()
            .unwrap();
        assert_eq!(result.entry, Some(entry));
        assert!(result.ty.qualifiers.is_const, "identity cast keeps qualifiers");
    }

    #[test]
    fn identity_cast_for_every_primitive_and_ptr() {
        let mut checker = TypeChecker::new();
        let node = CastNode::new(Span::new(0, 4));
        let int = checker.types.primitive(SuperType::Int);
        let ptr = QualType::new(checker.types.ptr_to(int));
        let mut cases: Vec<QualType> = [
            SuperType::Double,
            SuperType::Int,
            SuperType::Short,
            SuperType::Long,
            SuperType::Byte,
            SuperType::Char,
            SuperType::String,
            SuperType::Bool,
        ]
        .iter()
        .map(|st| checker.types.qt(*st))
        .collect();
        cases.push(ptr);
        for ty in cases {
            let rhs = ExprResult::new(ty);
            let result = checker.check_cast(&node, ty, &rhs).unwrap().unwrap();
            assert_eq!(result.ty.ty, ty.ty);
        }
        assert!(checker.soft_errors().is_empty());
    }

    #[test]
    fn pointer_cast_requires_unsafe() {
        let mut checker = TypeChecker::new();
        let int = checker.types.primitive(SuperType::Int);
        let byte = checker.types.primitive(SuperType::Byte);
        let int_ptr = QualType::new(checker.types.ptr_to(int));
        let byte_ptr = QualType::new(checker.types.ptr_to(byte));
        let node = CastNode::new(Span::new(0, 10));
        let rhs = ExprResult::new(int_ptr);
        let result = checker.check_cast(&node, byte_ptr, &rhs).unwrap().unwrap();
        assert_eq!(result.ty.ty, byte_ptr.ty);
        let errors = checker.check_for_soft_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error,
            SemanticError::UnsafeOperationInSafeContext { .. }
        ));
    }

    #[test]
    fn int_to_double_cast() {
        let mut checker = TypeChecker::new();
        let node = CastNode::new(Span::new(0, 9));
        let rhs = ExprResult::new(checker.types.qt(SuperType::Int));
        let result = checker
            .check_cast(&node, checker.types.qt(SuperType::Double), &rhs)
            .unwrap()
            .unwrap();
        assert_eq!(result.ty.super_type(&checker.types), SuperType::Double);
        assert!(checker.soft_errors().is_empty());
    }
}
