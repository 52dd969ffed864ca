// src/codegen/ops.rs
//
// Instruction selection for operators - impl Cg methods. Every branch here is
// keyed by the LowOp tag of the rule the checker matched, so an accepted type
// combination always has an emission path; a miss is an internal error.

use cranelift::prelude::*;
use tracing::trace;

use crate::errors::CodegenError;
use crate::frontend::{BinaryOpNode, CastNode, UnaryOpNode};
use crate::sema::op_rules::{binary_result_type, match_binary, match_unary, CAST_OP_RULES};
use crate::sema::{anonymous_symbol_name, BinOp, FunctionId, LowOp, QualType, SuperType, UnOp};

use super::context::Cg;
use super::function_registry::RuntimeFn;
use super::values::{cl_type, ExprValue};

/// The base operation of a compound assignment, for instruction choice.
fn base_op(op: BinOp) -> BinOp {
    match op {
        BinOp::PlusEqual => BinOp::Plus,
        BinOp::MinusEqual => BinOp::Minus,
        BinOp::MulEqual => BinOp::Mul,
        BinOp::DivEqual => BinOp::Div,
        BinOp::RemEqual => BinOp::Rem,
        BinOp::ShlEqual => BinOp::Shl,
        BinOp::ShrEqual => BinOp::Shr,
        BinOp::AndEqual => BinOp::BitwiseAnd,
        BinOp::OrEqual => BinOp::BitwiseOr,
        BinOp::XorEqual => BinOp::BitwiseXor,
        other => other,
    }
}

fn int_cc(op: BinOp, unsigned: bool) -> Option<IntCC> {
    Some(match op {
        BinOp::Equal => IntCC::Equal,
        BinOp::NotEqual => IntCC::NotEqual,
        BinOp::Less => {
            if unsigned {
                IntCC::UnsignedLessThan
            } else {
                IntCC::SignedLessThan
            }
        }
        BinOp::Greater => {
            if unsigned {
                IntCC::UnsignedGreaterThan
            } else {
                IntCC::SignedGreaterThan
            }
        }
        BinOp::LessEqual => {
            if unsigned {
                IntCC::UnsignedLessThanOrEqual
            } else {
                IntCC::SignedLessThanOrEqual
            }
        }
        BinOp::GreaterEqual => {
            if unsigned {
                IntCC::UnsignedGreaterThanOrEqual
            } else {
                IntCC::SignedGreaterThanOrEqual
            }
        }
        _ => return None,
    })
}

fn float_cc(op: BinOp) -> Option<FloatCC> {
    Some(match op {
        BinOp::Equal => FloatCC::Equal,
        BinOp::NotEqual => FloatCC::NotEqual,
        BinOp::Less => FloatCC::LessThan,
        BinOp::Greater => FloatCC::GreaterThan,
        BinOp::LessEqual => FloatCC::LessThanOrEqual,
        BinOp::GreaterEqual => FloatCC::GreaterThanOrEqual,
        _ => return None,
    })
}

impl Cg<'_, '_, '_> {
    /// Compile a binary operator application. Follows the same rule row the
    /// checker matched; a recorded overload takes precedence.
    pub fn binary_inst(
        &mut self,
        node: &BinaryOpNode,
        op: BinOp,
        lhs: &mut ExprValue,
        rhs: &mut ExprValue,
        op_idx: usize,
    ) -> Result<ExprValue, CodegenError> {
        if let Some(callee) = node.op_fct.get(self.ctx.sema.man_idx, op_idx) {
            let mut operands = [lhs, rhs];
            return self.overload_call(callee, &mut operands, node.span, op_idx);
        }

        let lhs_super = lhs.ty.strip_ref(self.types()).super_type(self.types());
        let rhs_super = rhs.ty.strip_ref(self.types()).super_type(self.types());
        let Some(rule) = match_binary(op.rules(), lhs_super, rhs_super) else {
            return Err(unhandled(op.symbol(), lhs_super, rhs_super));
        };
        trace!(op = op.symbol(), low_op = ?rule.low_op, "selecting");

        if op.is_compound_assign() {
            return self.compound_assign_inst(op, lhs, rhs);
        }

        let result_ty = binary_result_type(
            rule,
            lhs.ty.strip_ref(self.types()),
            rhs.ty.strip_ref(self.types()),
            false,
            self.types(),
        );
        let value = self.emit_binary_rule(rule.low_op, base_op(op), lhs, rhs, result_ty)?;
        Ok(ExprValue::from_value(value, result_ty))
    }

    /// Emit the low-level operation for one rule row, producing the raw value.
    fn emit_binary_rule(
        &mut self,
        low_op: LowOp,
        op: BinOp,
        lhs: &mut ExprValue,
        rhs: &mut ExprValue,
        result_ty: QualType,
    ) -> Result<Value, CodegenError> {
        let ptr_ty = self.pointer_type();
        let unsigned =
            lhs.ty.qualifiers.is_unsigned() || rhs.ty.qualifiers.is_unsigned();

        match low_op {
            LowOp::IntArith => {
                let target = cl_type(self.types(), result_ty, ptr_ty);
                let a_raw = lhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let b_raw = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let a = self.convert_int(a_raw, lhs.ty, target);
                let b = self.convert_int(b_raw, rhs.ty, target);
                let ins = self.builder.ins();
                let value = match op {
                    BinOp::Plus => ins.iadd(a, b),
                    BinOp::Minus => ins.isub(a, b),
                    BinOp::Mul => ins.imul(a, b),
                    BinOp::Div => {
                        if unsigned {
                            ins.udiv(a, b)
                        } else {
                            ins.sdiv(a, b)
                        }
                    }
                    BinOp::Rem => {
                        if unsigned {
                            ins.urem(a, b)
                        } else {
                            ins.srem(a, b)
                        }
                    }
                    BinOp::Shl => ins.ishl(a, b),
                    BinOp::Shr => {
                        if unsigned {
                            ins.ushr(a, b)
                        } else {
                            ins.sshr(a, b)
                        }
                    }
                    BinOp::BitwiseAnd => ins.band(a, b),
                    BinOp::BitwiseOr => ins.bor(a, b),
                    BinOp::BitwiseXor => ins.bxor(a, b),
                    _ => return Err(unhandled_op(op.symbol(), "integer arithmetic")),
                };
                Ok(value)
            }
            LowOp::FloatArith => {
                let a = self.to_float(lhs)?;
                let b = self.to_float(rhs)?;
                let ins = self.builder.ins();
                let value = match op {
                    BinOp::Plus => ins.fadd(a, b),
                    BinOp::Minus => ins.fsub(a, b),
                    BinOp::Mul => ins.fmul(a, b),
                    BinOp::Div => ins.fdiv(a, b),
                    _ => return Err(unhandled_op(op.symbol(), "float arithmetic")),
                };
                Ok(value)
            }
            LowOp::IntCmp => {
                // Compare at i64 width so mixed-width rows need no extra rows.
                let a_raw = lhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let b_raw = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let a = self.convert_int(a_raw, lhs.ty, types::I64);
                let b = self.convert_int(b_raw, rhs.ty, types::I64);
                let cc = int_cc(op, unsigned)
                    .ok_or_else(|| unhandled_op(op.symbol(), "integer compare"))?;
                Ok(self.builder.ins().icmp(cc, a, b))
            }
            LowOp::FloatCmp => {
                let a = self.to_float(lhs)?;
                let b = self.to_float(rhs)?;
                let cc =
                    float_cc(op).ok_or_else(|| unhandled_op(op.symbol(), "float compare"))?;
                Ok(self.builder.ins().fcmp(cc, a, b))
            }
            LowOp::BoolLogic => {
                let a = lhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let b = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let ins = self.builder.ins();
                let value = match op {
                    BinOp::LogicalAnd | BinOp::BitwiseAnd => ins.band(a, b),
                    BinOp::LogicalOr | BinOp::BitwiseOr => ins.bor(a, b),
                    BinOp::BitwiseXor => ins.bxor(a, b),
                    _ => return Err(unhandled_op(op.symbol(), "bool logic")),
                };
                Ok(value)
            }
            LowOp::PtrIndex => {
                let (ptr, index) = if lhs.ty.strip_ref(self.types()).is_ptr(self.types()) {
                    (&mut *lhs, &mut *rhs)
                } else {
                    (&mut *rhs, &mut *lhs)
                };
                let elem_size = self.element_size(ptr.ty);
                let base = ptr.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let index_raw =
                    index.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let index_ty = index.ty;
                let index_wide = self.convert_int(index_raw, index_ty, ptr_ty);
                let offset = self.builder.ins().imul_imm(index_wide, elem_size as i64);
                let value = match op {
                    BinOp::Plus => self.builder.ins().iadd(base, offset),
                    BinOp::Minus => self.builder.ins().isub(base, offset),
                    _ => return Err(unhandled_op(op.symbol(), "pointer arithmetic")),
                };
                Ok(value)
            }
            LowOp::PtrCmp | LowOp::FnPtrCmp => {
                let a = lhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let b = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let cc = match op {
                    BinOp::Equal => IntCC::Equal,
                    BinOp::NotEqual => IntCC::NotEqual,
                    _ => return Err(unhandled_op(op.symbol(), "pointer compare")),
                };
                Ok(self.builder.ins().icmp(cc, a, b))
            }
            LowOp::StringConcat => {
                let a = lhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let b = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                self.call_runtime(RuntimeFn::StringConcat, &[a, b])
            }
            LowOp::StringRepeatLhs | LowOp::StringRepeatRhs => {
                let (text, count) = if low_op == LowOp::StringRepeatLhs {
                    (&mut *lhs, &mut *rhs)
                } else {
                    (&mut *rhs, &mut *lhs)
                };
                let text_val = text.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let count_raw =
                    count.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let count_ty = count.ty;
                let count_wide = self.convert_int(count_raw, count_ty, types::I64);
                self.call_runtime(RuntimeFn::StringRepeat, &[text_val, count_wide])
            }
            LowOp::StringEq => {
                let a = lhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let b = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let eq = self.call_runtime(RuntimeFn::StringEq, &[a, b])?;
                Ok(match op {
                    BinOp::NotEqual => self.builder.ins().bxor_imm(eq, 1),
                    _ => eq,
                })
            }
            LowOp::NoOp => {
                Ok(rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty))
            }
            _ => Err(unhandled_op(op.symbol(), "binary operator")),
        }
    }

    /// Compound assignment: resolve the lhs address once, compute at the lhs
    /// type, store back through the same address.
    fn compound_assign_inst(
        &mut self,
        op: BinOp,
        lhs: &mut ExprValue,
        rhs: &mut ExprValue,
    ) -> Result<ExprValue, CodegenError> {
        let ptr_ty = self.pointer_type();
        let lhs_ty = lhs.ty.strip_ref(self.types());
        let rhs_ty = rhs.ty.strip_ref(self.types());
        let lhs_super = lhs_ty.super_type(self.types());
        let rhs_super = rhs_ty.super_type(self.types());
        let Some(rule) = match_binary(op.rules(), lhs_super, rhs_super) else {
            return Err(unhandled(op.symbol(), lhs_super, rhs_super));
        };
        let result_ty = binary_result_type(rule, lhs_ty, rhs_ty, true, self.types());

        lhs.resolve_addr(&mut self.builder, self.ctx.sema.types, ptr_ty);
        let raw = self.emit_binary_rule(rule.low_op, base_op(op), lhs, rhs, result_ty)?;
        // The rule result already has the lhs category; narrow back just in
        // case the emission widened (e.g. nothing today, but stores must match).
        let stored = self.convert_int_if_needed(raw, result_ty);
        lhs.store(&mut self.builder, stored);
        let mut out = ExprValue::from_value(stored, result_ty);
        out.entry = lhs.entry;
        Ok(out)
    }

    /// Plain assignment: convert the rhs to the lhs type and store it. A copy
    /// constructor, when resolved by the checker, replaces the raw store.
    pub fn assign_inst(
        &mut self,
        lhs: &mut ExprValue,
        rhs: &mut ExprValue,
        copy_ctor: Option<FunctionId>,
    ) -> Result<ExprValue, CodegenError> {
        let ptr_ty = self.pointer_type();
        lhs.resolve_addr(&mut self.builder, self.ctx.sema.types, ptr_ty);
        let value = if let Some(ctor) = copy_ctor {
            let src = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
            let func_ref = self.func_ref_for(ctor)?;
            let call = self.builder.ins().call(func_ref, &[src]);
            self.builder
                .inst_results(call)
                .first()
                .copied()
                .ok_or_else(|| CodegenError::Internal("copy constructor has no result".into()))?
        } else {
            let raw = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
            let rhs_ty = rhs.ty;
            let lhs_ty = lhs.ty;
            self.convert_scalar(raw, rhs_ty, lhs_ty)
        };
        lhs.store(&mut self.builder, value);
        let mut out = ExprValue::from_value(value, lhs.ty);
        out.entry = lhs.entry;
        Ok(out)
    }

    /// Compile a unary operator application.
    pub fn unary_inst(
        &mut self,
        node: &UnaryOpNode,
        op: UnOp,
        operand: &mut ExprValue,
        op_idx: usize,
    ) -> Result<ExprValue, CodegenError> {
        if let Some(callee) = node.op_fct.get(self.ctx.sema.man_idx, op_idx) {
            let mut operands = [operand];
            return self.overload_call(callee, &mut operands, node.span, op_idx);
        }

        let ptr_ty = self.pointer_type();
        let operand_ty = operand.ty.strip_ref(self.types());
        let operand_super = operand_ty.super_type(self.types());
        let Some(rule) = match_unary(op.rules(), operand_super) else {
            return Err(CodegenError::UnhandledBranch {
                op: op.symbol().to_string(),
                combination: format!("{:?}", operand_super),
            });
        };

        match op {
            UnOp::PrefixMinus => {
                let value = operand.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let negated = if rule.low_op == LowOp::FloatArith {
                    self.builder.ins().fneg(value)
                } else {
                    self.builder.ins().ineg(value)
                };
                Ok(ExprValue::from_value(negated, operand_ty))
            }
            UnOp::Not => {
                let value = operand.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let flipped = self.builder.ins().bxor_imm(value, 1);
                Ok(ExprValue::from_value(flipped, operand_ty))
            }
            UnOp::BitwiseNot => {
                let value = operand.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let inverted = self.builder.ins().bnot(value);
                Ok(ExprValue::from_value(inverted, operand_ty))
            }
            UnOp::PrefixPlusPlus
            | UnOp::PrefixMinusMinus
            | UnOp::PostfixPlusPlus
            | UnOp::PostfixMinusMinus => {
                let step: i64 = if rule.low_op == LowOp::PtrIndex {
                    self.element_size(operand_ty) as i64
                } else {
                    1
                };
                let signed_step = match op {
                    UnOp::PrefixMinusMinus | UnOp::PostfixMinusMinus => -step,
                    _ => step,
                };
                operand.resolve_addr(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let old = operand.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let new = self.builder.ins().iadd_imm(old, signed_step);
                operand.store(&mut self.builder, new);
                let visible = match op {
                    UnOp::PostfixPlusPlus | UnOp::PostfixMinusMinus => old,
                    _ => new,
                };
                let mut out = ExprValue::from_value(visible, operand_ty);
                out.entry = operand.entry;
                Ok(out)
            }
        }
    }

    /// Compile an explicit cast. Identity casts produce the operand untouched.
    pub fn cast_inst(
        &mut self,
        _node: &CastNode,
        target: QualType,
        rhs: &mut ExprValue,
    ) -> Result<ExprValue, CodegenError> {
        let rhs_ty = rhs.ty.strip_ref(self.types());
        if target.ty == rhs_ty.ty {
            return Ok(rhs.clone());
        }

        let ptr_ty = self.pointer_type();
        let target_super = target.super_type(self.types());
        let rhs_super = rhs_ty.super_type(self.types());
        let Some(rule) = match_binary(CAST_OP_RULES, target_super, rhs_super) else {
            return Err(unhandled("cast", target_super, rhs_super));
        };

        let raw = rhs.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
        let value = match rule.low_op {
            LowOp::IntResize => {
                let target_cl = cl_type(self.types(), target, ptr_ty);
                self.convert_int(raw, rhs_ty, target_cl)
            }
            LowOp::IntToFloat => {
                if rhs_ty.qualifiers.is_unsigned() {
                    self.builder.ins().fcvt_from_uint(types::F64, raw)
                } else {
                    self.builder.ins().fcvt_from_sint(types::F64, raw)
                }
            }
            LowOp::FloatToInt => {
                let target_cl = cl_type(self.types(), target, ptr_ty);
                if target.qualifiers.is_unsigned() {
                    self.builder.ins().fcvt_to_uint_sat(target_cl, raw)
                } else {
                    self.builder.ins().fcvt_to_sint_sat(target_cl, raw)
                }
            }
            LowOp::PtrCast | LowOp::NoOp => raw,
            other => {
                return Err(CodegenError::Internal(format!(
                    "cast selected non-cast op {:?}",
                    other
                )))
            }
        };
        Ok(ExprValue::from_value(value, target.with_const(false)))
    }

    /// Call a resolved operator overload. By-reference parameters receive the
    /// operand's address; everything else a converted value. Procedures yield
    /// a constant true so operator chaining stays well-formed.
    pub fn overload_call(
        &mut self,
        callee: FunctionId,
        operands: &mut [&mut ExprValue],
        span: crate::frontend::Span,
        op_idx: usize,
    ) -> Result<ExprValue, CodegenError> {
        let ptr_ty = self.pointer_type();
        let function = self.ctx.sema.functions.get(callee);
        let is_procedure = function.is_procedure;
        let return_type = function.return_type;
        let param_refs: Vec<bool> = (0..function.params.len())
            .map(|i| function.param_is_ref(i, self.ctx.sema.types))
            .collect();
        let param_types: Vec<QualType> = function.params.iter().copied().collect();

        let mut args = Vec::with_capacity(operands.len());
        for (idx, operand) in operands.iter_mut().enumerate() {
            let by_ref = param_refs.get(idx).copied().unwrap_or(false);
            if by_ref {
                args.push(operand.resolve_addr(&mut self.builder, self.ctx.sema.types, ptr_ty));
            } else {
                let raw = operand.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
                let from = operand.ty;
                let to = param_types.get(idx).copied().unwrap_or(from);
                args.push(self.convert_scalar(raw, from, to));
            }
        }

        let func_ref = self.func_ref_for(callee)?;
        let call = self.builder.ins().call(func_ref, &args);

        if is_procedure {
            let truthy = self.builder.ins().iconst(types::I8, 1);
            return Ok(ExprValue::from_value(
                truthy,
                self.types().qt(SuperType::Bool),
            ));
        }

        let value = self
            .builder
            .inst_results(call)
            .first()
            .copied()
            .ok_or_else(|| CodegenError::Internal("overload call has no result".into()))?;
        let mut out = ExprValue::from_value(value, return_type);
        // Destruction-tracked results share the checker's anonymous entry.
        let tracked = self
            .ctx
            .sema
            .types
            .struct_id(return_type.ty)
            .map(|sid| !self.ctx.sema.types.struct_def(sid).trivially_destructible)
            .unwrap_or(false);
        if tracked {
            // Give the temporary stack storage so destructor insertion has an
            // address to work with, and bind it to the checker's entry.
            out.resolve_addr(&mut self.builder, self.ctx.sema.types, ptr_ty);
            let name = anonymous_symbol_name(span, op_idx);
            out.entry = self.ctx.sema.scope.lookup(&name);
        }
        Ok(out)
    }

    /// Integer width conversion honoring the source signedness.
    fn convert_int(&mut self, value: Value, from: QualType, target: Type) -> Value {
        let ptr_ty = self.pointer_type();
        let from_cl = cl_type(self.types(), from.strip_ref(self.types()), ptr_ty);
        if from_cl == target {
            return value;
        }
        if from_cl.bits() < target.bits() {
            if from.qualifiers.is_unsigned() {
                self.builder.ins().uextend(target, value)
            } else {
                self.builder.ins().sextend(target, value)
            }
        } else {
            self.builder.ins().ireduce(target, value)
        }
    }

    fn convert_int_if_needed(&mut self, value: Value, ty: QualType) -> Value {
        let ptr_ty = self.pointer_type();
        let target = cl_type(self.types(), ty, ptr_ty);
        if self.builder.func.dfg.value_type(value) == target || target == types::F64 {
            value
        } else {
            self.convert_int_raw(value, target, ty.qualifiers.is_unsigned())
        }
    }

    fn convert_int_raw(&mut self, value: Value, target: Type, unsigned: bool) -> Value {
        let from = self.builder.func.dfg.value_type(value);
        if from == target {
            value
        } else if from.bits() < target.bits() {
            if unsigned {
                self.builder.ins().uextend(target, value)
            } else {
                self.builder.ins().sextend(target, value)
            }
        } else {
            self.builder.ins().ireduce(target, value)
        }
    }

    /// Scalar conversion between two qualified types, for stores and argument
    /// passing.
    fn convert_scalar(&mut self, value: Value, from: QualType, to: QualType) -> Value {
        let ptr_ty = self.pointer_type();
        let from_cl = cl_type(self.types(), from.strip_ref(self.types()), ptr_ty);
        let to_cl = cl_type(self.types(), to.strip_ref(self.types()), ptr_ty);
        if from_cl == to_cl {
            value
        } else if from_cl == types::F64 {
            self.builder.ins().fcvt_to_sint_sat(to_cl, value)
        } else if to_cl == types::F64 {
            if from.qualifiers.is_unsigned() {
                self.builder.ins().fcvt_from_uint(types::F64, value)
            } else {
                self.builder.ins().fcvt_from_sint(types::F64, value)
            }
        } else {
            self.convert_int(value, from, to_cl)
        }
    }

    /// Convert an operand to f64 for float arithmetic/compares.
    fn to_float(&mut self, operand: &mut ExprValue) -> Result<Value, CodegenError> {
        let ptr_ty = self.pointer_type();
        let raw = operand.resolve_value(&mut self.builder, self.ctx.sema.types, ptr_ty);
        let ty = operand.ty.strip_ref(self.types());
        if ty.is(self.types(), SuperType::Double) {
            return Ok(raw);
        }
        Ok(if ty.qualifiers.is_unsigned() {
            self.builder.ins().fcvt_from_uint(types::F64, raw)
        } else {
            self.builder.ins().fcvt_from_sint(types::F64, raw)
        })
    }

    /// Byte size of a pointer's element type, for scaled index arithmetic.
    fn element_size(&self, ptr: QualType) -> u32 {
        let ptr_ty = self.pointer_type();
        let stripped = ptr.strip_ref(self.types());
        match stripped.contained(self.types()) {
            Some(inner) => cl_type(self.types(), inner, ptr_ty).bytes(),
            None => ptr_ty.bytes(),
        }
    }
}

fn unhandled(op: &str, lhs: SuperType, rhs: SuperType) -> CodegenError {
    CodegenError::UnhandledBranch {
        op: op.to_string(),
        combination: format!("{:?} and {:?}", lhs, rhs),
    }
}

fn unhandled_op(op: &str, family: &str) -> CodegenError {
    CodegenError::UnhandledBranch {
        op: op.to_string(),
        combination: family.to_string(),
    }
}
