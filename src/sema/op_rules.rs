// src/sema/op_rules.rs
//
// The canonical operator tables. One ordered row list per operator family;
// each row carries the result category, the unsafe flag, and the LowOp tag
// naming the emission strategy. The type checker and the instruction selector
// both consult these rows, so the two passes cannot drift apart.
//
// Rows are searched in declaration order and the first match wins; order is a
// contract (asymmetric promotion is encoded as distinct rows per direction).

use super::type_registry::TypeRegistry;
use super::types::SuperType::*;
use super::types::{QualType, SuperType};

/// Emission strategy for a matched rule. Identifies the concrete low-level
/// operation family the selector must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LowOp {
    /// Native integer op at the result width; signedness taken from operands.
    IntArith,
    /// Native float op; integer operands converted to float first.
    FloatArith,
    /// Integer compare; signed/unsigned condition code from operands.
    IntCmp,
    /// Float compare; integer operands converted first.
    FloatCmp,
    /// Bitwise op on i8 truth values.
    BoolLogic,
    /// Pointer plus/minus integer via element-scaled index address.
    PtrIndex,
    /// Raw pointer equality compare.
    PtrCmp,
    /// Function/procedure values compared bitwise.
    FnPtrCmp,
    /// Runtime call: string concatenation.
    StringConcat,
    /// Runtime call: string repetition, string operand on the left.
    StringRepeatLhs,
    /// Runtime call: string repetition, string operand on the right.
    StringRepeatRhs,
    /// Runtime call: raw string equality.
    StringEq,
    /// Value passes through unchanged (assignment stores, identity-like casts).
    NoOp,
    /// Cast: integer width change.
    IntResize,
    /// Cast: integer to float.
    IntToFloat,
    /// Cast: float to integer.
    FloatToInt,
    /// Cast: pointer reinterpretation, same bits.
    PtrCast,
}

/// One row of a binary operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOpRule {
    pub lhs: SuperType,
    pub rhs: SuperType,
    pub result: SuperType,
    pub unsafe_op: bool,
    pub low_op: LowOp,
}

/// One row of a unary operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnaryOpRule {
    pub operand: SuperType,
    pub result: SuperType,
    pub unsafe_op: bool,
    pub low_op: LowOp,
}

const fn rule(lhs: SuperType, rhs: SuperType, result: SuperType, low_op: LowOp) -> BinaryOpRule {
    BinaryOpRule {
        lhs,
        rhs,
        result,
        unsafe_op: false,
        low_op,
    }
}

const fn unsafe_rule(
    lhs: SuperType,
    rhs: SuperType,
    result: SuperType,
    low_op: LowOp,
) -> BinaryOpRule {
    BinaryOpRule {
        lhs,
        rhs,
        result,
        unsafe_op: true,
        low_op,
    }
}

const fn un_rule(operand: SuperType, result: SuperType, low_op: LowOp) -> UnaryOpRule {
    UnaryOpRule {
        operand,
        result,
        unsafe_op: false,
        low_op,
    }
}

const fn unsafe_un_rule(operand: SuperType, result: SuperType, low_op: LowOp) -> UnaryOpRule {
    UnaryOpRule {
        operand,
        result,
        unsafe_op: true,
        low_op,
    }
}

// Assignment fallback table: exact primitive matches only. Everything richer
// (pointers, references, structs, decay) is handled by the assignment checker
// before this table is consulted.
pub const ASSIGN_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::NoOp),
    rule(Int, Int, Int, LowOp::NoOp),
    rule(Short, Short, Short, LowOp::NoOp),
    rule(Long, Long, Long, LowOp::NoOp),
    rule(Byte, Byte, Byte, LowOp::NoOp),
    rule(Char, Char, Char, LowOp::NoOp),
    rule(String, String, String, LowOp::NoOp),
    rule(Bool, Bool, Bool, LowOp::NoOp),
];

// Compound assignments keep the lhs type: `int += short` stays int while
// `short += int` stays short. Both directions are explicit rows.
pub const PLUS_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    rule(String, String, String, LowOp::StringConcat),
    unsafe_rule(Ptr, Int, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Short, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Long, Ptr, LowOp::PtrIndex),
];

pub const MINUS_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    unsafe_rule(Ptr, Int, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Short, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Long, Ptr, LowOp::PtrIndex),
];

pub const MUL_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const DIV_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const REM_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
];

pub const SHL_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Byte, Int, Byte, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const SHR_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Byte, Int, Byte, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const AND_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const OR_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const XOR_EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const LOGICAL_AND_OP_RULES: &[BinaryOpRule] =
    &[rule(Bool, Bool, Bool, LowOp::BoolLogic)];

pub const LOGICAL_OR_OP_RULES: &[BinaryOpRule] =
    &[rule(Bool, Bool, Bool, LowOp::BoolLogic)];

pub const BITWISE_AND_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    rule(Bool, Bool, Bool, LowOp::BoolLogic),
];

pub const BITWISE_OR_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    rule(Bool, Bool, Bool, LowOp::BoolLogic),
];

pub const BITWISE_XOR_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    rule(Bool, Bool, Bool, LowOp::BoolLogic),
];

pub const EQUAL_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Bool, LowOp::FloatCmp),
    rule(Double, Int, Bool, LowOp::FloatCmp),
    rule(Double, Short, Bool, LowOp::FloatCmp),
    rule(Double, Long, Bool, LowOp::FloatCmp),
    rule(Int, Double, Bool, LowOp::FloatCmp),
    rule(Int, Int, Bool, LowOp::IntCmp),
    rule(Int, Short, Bool, LowOp::IntCmp),
    rule(Int, Long, Bool, LowOp::IntCmp),
    rule(Int, Char, Bool, LowOp::IntCmp),
    rule(Short, Double, Bool, LowOp::FloatCmp),
    rule(Short, Int, Bool, LowOp::IntCmp),
    rule(Short, Short, Bool, LowOp::IntCmp),
    rule(Short, Long, Bool, LowOp::IntCmp),
    rule(Long, Double, Bool, LowOp::FloatCmp),
    rule(Long, Int, Bool, LowOp::IntCmp),
    rule(Long, Short, Bool, LowOp::IntCmp),
    rule(Long, Long, Bool, LowOp::IntCmp),
    rule(Byte, Byte, Bool, LowOp::IntCmp),
    rule(Char, Char, Bool, LowOp::IntCmp),
    rule(Char, Int, Bool, LowOp::IntCmp),
    rule(String, String, Bool, LowOp::StringEq),
    rule(Bool, Bool, Bool, LowOp::IntCmp),
    rule(Ptr, Ptr, Bool, LowOp::PtrCmp),
    rule(Function, Function, Bool, LowOp::FnPtrCmp),
    rule(Procedure, Procedure, Bool, LowOp::FnPtrCmp),
];

pub const NOT_EQUAL_OP_RULES: &[BinaryOpRule] = EQUAL_OP_RULES;

pub const LESS_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Bool, LowOp::FloatCmp),
    rule(Double, Int, Bool, LowOp::FloatCmp),
    rule(Double, Short, Bool, LowOp::FloatCmp),
    rule(Double, Long, Bool, LowOp::FloatCmp),
    rule(Int, Double, Bool, LowOp::FloatCmp),
    rule(Int, Int, Bool, LowOp::IntCmp),
    rule(Int, Short, Bool, LowOp::IntCmp),
    rule(Int, Long, Bool, LowOp::IntCmp),
    rule(Short, Double, Bool, LowOp::FloatCmp),
    rule(Short, Int, Bool, LowOp::IntCmp),
    rule(Short, Short, Bool, LowOp::IntCmp),
    rule(Short, Long, Bool, LowOp::IntCmp),
    rule(Long, Double, Bool, LowOp::FloatCmp),
    rule(Long, Int, Bool, LowOp::IntCmp),
    rule(Long, Short, Bool, LowOp::IntCmp),
    rule(Long, Long, Bool, LowOp::IntCmp),
    rule(Byte, Byte, Bool, LowOp::IntCmp),
    rule(Char, Char, Bool, LowOp::IntCmp),
];

pub const GREATER_OP_RULES: &[BinaryOpRule] = LESS_OP_RULES;
pub const LESS_EQUAL_OP_RULES: &[BinaryOpRule] = LESS_OP_RULES;
pub const GREATER_EQUAL_OP_RULES: &[BinaryOpRule] = LESS_OP_RULES;

// Shifts keep the lhs type; the rhs only needs to be integral.
pub const SHL_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Int, LowOp::IntArith),
    rule(Short, Int, Short, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Int, Byte, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

pub const SHR_OP_RULES: &[BinaryOpRule] = SHL_OP_RULES;

pub const PLUS_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Double, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Long, LowOp::IntArith),
    rule(Short, Double, Double, LowOp::FloatArith),
    rule(Short, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Long, LowOp::IntArith),
    rule(Long, Double, Double, LowOp::FloatArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    rule(String, String, String, LowOp::StringConcat),
    unsafe_rule(Ptr, Int, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Short, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Long, Ptr, LowOp::PtrIndex),
];

pub const MINUS_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Double, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Long, LowOp::IntArith),
    rule(Short, Double, Double, LowOp::FloatArith),
    rule(Short, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Long, LowOp::IntArith),
    rule(Long, Double, Double, LowOp::FloatArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    unsafe_rule(Ptr, Int, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Short, Ptr, LowOp::PtrIndex),
    unsafe_rule(Ptr, Long, Ptr, LowOp::PtrIndex),
];

pub const MUL_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Double, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Long, LowOp::IntArith),
    rule(Short, Double, Double, LowOp::FloatArith),
    rule(Short, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Long, LowOp::IntArith),
    rule(Long, Double, Double, LowOp::FloatArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
    rule(String, Int, String, LowOp::StringRepeatLhs),
    rule(String, Long, String, LowOp::StringRepeatLhs),
    rule(Int, String, String, LowOp::StringRepeatRhs),
    rule(Long, String, String, LowOp::StringRepeatRhs),
];

pub const DIV_OP_RULES: &[BinaryOpRule] = &[
    rule(Double, Double, Double, LowOp::FloatArith),
    rule(Double, Int, Double, LowOp::FloatArith),
    rule(Double, Short, Double, LowOp::FloatArith),
    rule(Double, Long, Double, LowOp::FloatArith),
    rule(Int, Double, Double, LowOp::FloatArith),
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Long, LowOp::IntArith),
    rule(Short, Double, Double, LowOp::FloatArith),
    rule(Short, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Long, LowOp::IntArith),
    rule(Long, Double, Double, LowOp::FloatArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
    rule(Byte, Byte, Byte, LowOp::IntArith),
];

// Remainder is integer-only; there is deliberately no float lowering.
pub const REM_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Int, Int, LowOp::IntArith),
    rule(Int, Short, Int, LowOp::IntArith),
    rule(Int, Long, Long, LowOp::IntArith),
    rule(Short, Int, Int, LowOp::IntArith),
    rule(Short, Short, Short, LowOp::IntArith),
    rule(Short, Long, Long, LowOp::IntArith),
    rule(Long, Int, Long, LowOp::IntArith),
    rule(Long, Short, Long, LowOp::IntArith),
    rule(Long, Long, Long, LowOp::IntArith),
];

// Cast table: lhs is the target type, rhs the source. Identity casts are
// short-circuited by the checker before this table is consulted.
pub const CAST_OP_RULES: &[BinaryOpRule] = &[
    rule(Int, Double, Int, LowOp::FloatToInt),
    rule(Int, Short, Int, LowOp::IntResize),
    rule(Int, Long, Int, LowOp::IntResize),
    rule(Int, Byte, Int, LowOp::IntResize),
    rule(Int, Char, Int, LowOp::IntResize),
    rule(Double, Int, Double, LowOp::IntToFloat),
    rule(Double, Short, Double, LowOp::IntToFloat),
    rule(Double, Long, Double, LowOp::IntToFloat),
    rule(Short, Int, Short, LowOp::IntResize),
    rule(Short, Long, Short, LowOp::IntResize),
    rule(Long, Int, Long, LowOp::IntResize),
    rule(Long, Short, Long, LowOp::IntResize),
    rule(Long, Double, Long, LowOp::FloatToInt),
    rule(Byte, Int, Byte, LowOp::IntResize),
    rule(Byte, Long, Byte, LowOp::IntResize),
    rule(Byte, Char, Byte, LowOp::IntResize),
    rule(Char, Int, Char, LowOp::IntResize),
    rule(Char, Short, Char, LowOp::IntResize),
    rule(Char, Long, Char, LowOp::IntResize),
    rule(Char, Byte, Char, LowOp::IntResize),
    unsafe_rule(Ptr, Ptr, Ptr, LowOp::PtrCast),
];

pub const PREFIX_MINUS_OP_RULES: &[UnaryOpRule] = &[
    un_rule(Double, Double, LowOp::FloatArith),
    un_rule(Int, Int, LowOp::IntArith),
    un_rule(Short, Short, LowOp::IntArith),
    un_rule(Long, Long, LowOp::IntArith),
];

pub const PREFIX_PLUS_PLUS_OP_RULES: &[UnaryOpRule] = &[
    un_rule(Int, Int, LowOp::IntArith),
    un_rule(Short, Short, LowOp::IntArith),
    un_rule(Long, Long, LowOp::IntArith),
    unsafe_un_rule(Ptr, Ptr, LowOp::PtrIndex),
];

pub const PREFIX_MINUS_MINUS_OP_RULES: &[UnaryOpRule] = PREFIX_PLUS_PLUS_OP_RULES;
pub const POSTFIX_PLUS_PLUS_OP_RULES: &[UnaryOpRule] = PREFIX_PLUS_PLUS_OP_RULES;
pub const POSTFIX_MINUS_MINUS_OP_RULES: &[UnaryOpRule] = PREFIX_PLUS_PLUS_OP_RULES;

pub const NOT_OP_RULES: &[UnaryOpRule] = &[un_rule(Bool, Bool, LowOp::BoolLogic)];

pub const BITWISE_NOT_OP_RULES: &[UnaryOpRule] = &[
    un_rule(Int, Int, LowOp::IntArith),
    un_rule(Short, Short, LowOp::IntArith),
    un_rule(Long, Long, LowOp::IntArith),
    un_rule(Byte, Byte, LowOp::IntArith),
];

/// Ordered linear scan; first matching row wins.
pub fn match_binary(
    rules: &'static [BinaryOpRule],
    lhs: SuperType,
    rhs: SuperType,
) -> Option<&'static BinaryOpRule> {
    rules.iter().find(|r| r.lhs == lhs && r.rhs == rhs)
}

pub fn match_unary(
    rules: &'static [UnaryOpRule],
    operand: SuperType,
) -> Option<&'static UnaryOpRule> {
    rules.iter().find(|r| r.operand == operand)
}

/// Build the result QualType for a matched row. When the result category is
/// one of the operand categories, that operand's full type (including wrapped
/// chains, e.g. the pointer's element type) is reused; otherwise a fresh
/// primitive is taken from the registry. The assignment family preserves lhs
/// qualifiers; everything else produces a non-const temporary.
pub fn binary_result_type(
    rule: &BinaryOpRule,
    lhs: QualType,
    rhs: QualType,
    preserve_lhs_qualifiers: bool,
    types: &TypeRegistry,
) -> QualType {
    let mut out = if lhs.super_type(types) == rule.result {
        lhs
    } else if rhs.super_type(types) == rule.result {
        rhs
    } else {
        types.qt(rule.result)
    };
    if preserve_lhs_qualifiers {
        out.qualifiers = lhs.qualifiers;
    } else {
        out.qualifiers.is_const = false;
    }
    out
}

pub fn unary_result_type(rule: &UnaryOpRule, operand: QualType, types: &TypeRegistry) -> QualType {
    let mut out = if operand.super_type(types) == rule.result {
        operand
    } else {
        types.qt(rule.result)
    };
    out.qualifiers.is_const = false;
    out
}

/// Binary operator families. Carries the display symbol, the rule table, and
/// the overload mangled name where the language permits overloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Assign,
    PlusEqual,
    MinusEqual,
    MulEqual,
    DivEqual,
    RemEqual,
    ShlEqual,
    ShrEqual,
    AndEqual,
    OrEqual,
    XorEqual,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Shl,
    Shr,
    Plus,
    Minus,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Assign => "=",
            BinOp::PlusEqual => "+=",
            BinOp::MinusEqual => "-=",
            BinOp::MulEqual => "*=",
            BinOp::DivEqual => "/=",
            BinOp::RemEqual => "%=",
            BinOp::ShlEqual => "<<=",
            BinOp::ShrEqual => ">>=",
            BinOp::AndEqual => "&=",
            BinOp::OrEqual => "|=",
            BinOp::XorEqual => "^=",
            BinOp::LogicalAnd => "&&",
            BinOp::LogicalOr => "||",
            BinOp::BitwiseAnd => "&",
            BinOp::BitwiseOr => "|",
            BinOp::BitwiseXor => "^",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEqual => "<=",
            BinOp::GreaterEqual => ">=",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }

    pub fn rules(&self) -> &'static [BinaryOpRule] {
        match self {
            BinOp::Assign => ASSIGN_OP_RULES,
            BinOp::PlusEqual => PLUS_EQUAL_OP_RULES,
            BinOp::MinusEqual => MINUS_EQUAL_OP_RULES,
            BinOp::MulEqual => MUL_EQUAL_OP_RULES,
            BinOp::DivEqual => DIV_EQUAL_OP_RULES,
            BinOp::RemEqual => REM_EQUAL_OP_RULES,
            BinOp::ShlEqual => SHL_EQUAL_OP_RULES,
            BinOp::ShrEqual => SHR_EQUAL_OP_RULES,
            BinOp::AndEqual => AND_EQUAL_OP_RULES,
            BinOp::OrEqual => OR_EQUAL_OP_RULES,
            BinOp::XorEqual => XOR_EQUAL_OP_RULES,
            BinOp::LogicalAnd => LOGICAL_AND_OP_RULES,
            BinOp::LogicalOr => LOGICAL_OR_OP_RULES,
            BinOp::BitwiseAnd => BITWISE_AND_OP_RULES,
            BinOp::BitwiseOr => BITWISE_OR_OP_RULES,
            BinOp::BitwiseXor => BITWISE_XOR_OP_RULES,
            BinOp::Equal => EQUAL_OP_RULES,
            BinOp::NotEqual => NOT_EQUAL_OP_RULES,
            BinOp::Less => LESS_OP_RULES,
            BinOp::Greater => GREATER_OP_RULES,
            BinOp::LessEqual => LESS_EQUAL_OP_RULES,
            BinOp::GreaterEqual => GREATER_EQUAL_OP_RULES,
            BinOp::Shl => SHL_OP_RULES,
            BinOp::Shr => SHR_OP_RULES,
            BinOp::Plus => PLUS_OP_RULES,
            BinOp::Minus => MINUS_OP_RULES,
            BinOp::Mul => MUL_OP_RULES,
            BinOp::Div => DIV_OP_RULES,
            BinOp::Rem => REM_OP_RULES,
        }
    }

    /// Mangled function name tried for user overloads, where permitted.
    pub fn overload_name(&self) -> Option<&'static str> {
        match self {
            BinOp::Plus => Some(super::overload::OP_FCT_PLUS),
            BinOp::Minus => Some(super::overload::OP_FCT_MINUS),
            BinOp::Mul => Some(super::overload::OP_FCT_MUL),
            BinOp::Div => Some(super::overload::OP_FCT_DIV),
            BinOp::Equal => Some(super::overload::OP_FCT_EQUAL),
            BinOp::NotEqual => Some(super::overload::OP_FCT_NOT_EQUAL),
            BinOp::Shl => Some(super::overload::OP_FCT_SHL),
            BinOp::Shr => Some(super::overload::OP_FCT_SHR),
            BinOp::PlusEqual => Some(super::overload::OP_FCT_PLUS_EQUAL),
            BinOp::MinusEqual => Some(super::overload::OP_FCT_MINUS_EQUAL),
            BinOp::MulEqual => Some(super::overload::OP_FCT_MUL_EQUAL),
            BinOp::DivEqual => Some(super::overload::OP_FCT_DIV_EQUAL),
            _ => None,
        }
    }

    pub fn is_compound_assign(&self) -> bool {
        matches!(
            self,
            BinOp::PlusEqual
                | BinOp::MinusEqual
                | BinOp::MulEqual
                | BinOp::DivEqual
                | BinOp::RemEqual
                | BinOp::ShlEqual
                | BinOp::ShrEqual
                | BinOp::AndEqual
                | BinOp::OrEqual
                | BinOp::XorEqual
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Equal
                | BinOp::NotEqual
                | BinOp::Less
                | BinOp::Greater
                | BinOp::LessEqual
                | BinOp::GreaterEqual
        )
    }
}

/// Unary operator families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    PrefixMinus,
    PrefixPlusPlus,
    PrefixMinusMinus,
    PostfixPlusPlus,
    PostfixMinusMinus,
    Not,
    BitwiseNot,
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::PrefixMinus => "-",
            UnOp::PrefixPlusPlus => "++",
            UnOp::PrefixMinusMinus => "--",
            UnOp::PostfixPlusPlus => "++ (post)",
            UnOp::PostfixMinusMinus => "-- (post)",
            UnOp::Not => "!",
            UnOp::BitwiseNot => "~",
        }
    }

    pub fn rules(&self) -> &'static [UnaryOpRule] {
        match self {
            UnOp::PrefixMinus => PREFIX_MINUS_OP_RULES,
            UnOp::PrefixPlusPlus => PREFIX_PLUS_PLUS_OP_RULES,
            UnOp::PrefixMinusMinus => PREFIX_MINUS_MINUS_OP_RULES,
            UnOp::PostfixPlusPlus => POSTFIX_PLUS_PLUS_OP_RULES,
            UnOp::PostfixMinusMinus => POSTFIX_MINUS_MINUS_OP_RULES,
            UnOp::Not => NOT_OP_RULES,
            UnOp::BitwiseNot => BITWISE_NOT_OP_RULES,
        }
    }

    pub fn overload_name(&self) -> Option<&'static str> {
        match self {
            UnOp::PostfixPlusPlus => Some(super::overload::OP_FCT_POSTFIX_PLUS_PLUS),
            UnOp::PostfixMinusMinus => Some(super::overload::OP_FCT_POSTFIX_MINUS_MINUS),
            _ => None,
        }
    }

    pub fn is_increment_decrement(&self) -> bool {
        matches!(
            self,
            UnOp::PrefixPlusPlus
                | UnOp::PrefixMinusMinus
                | UnOp::PostfixPlusPlus
                | UnOp::PostfixMinusMinus
        )
    }
}

/// All binary families, for consistency enumeration in tests.
pub static ALL_BIN_OPS: &[BinOp] = &[
    BinOp::Assign,
    BinOp::PlusEqual,
    BinOp::MinusEqual,
    BinOp::MulEqual,
    BinOp::DivEqual,
    BinOp::RemEqual,
    BinOp::ShlEqual,
    BinOp::ShrEqual,
    BinOp::AndEqual,
    BinOp::OrEqual,
    BinOp::XorEqual,
    BinOp::LogicalAnd,
    BinOp::LogicalOr,
    BinOp::BitwiseAnd,
    BinOp::BitwiseOr,
    BinOp::BitwiseXor,
    BinOp::Equal,
    BinOp::NotEqual,
    BinOp::Less,
    BinOp::Greater,
    BinOp::LessEqual,
    BinOp::GreaterEqual,
    BinOp::Shl,
    BinOp::Shr,
    BinOp::Plus,
    BinOp::Minus,
    BinOp::Mul,
    BinOp::Div,
    BinOp::Rem,
];

pub static ALL_UN_OPS: &[UnOp] = &[
    UnOp::PrefixMinus,
    UnOp::PrefixPlusPlus,
    UnOp::PrefixMinusMinus,
    UnOp::PostfixPlusPlus,
    UnOp::PostfixMinusMinus,
    UnOp::Not,
    UnOp::BitwiseNot,
];
