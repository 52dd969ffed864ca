// src/frontend/ast.rs
//
// Operator AST nodes - the hand-off channel between type checking and codegen.
// Resolved operator-overload callees are recorded here during type checking and
// consulted again during instruction selection.

use rustc_hash::FxHashMap;

use crate::sema::FunctionId;

use super::Span;

/// Overload-recording slots on an operator node.
///
/// A node can be type-checked multiple times: once per generic substantiation
/// pass (`man_idx`) and once per operator occurrence within a pass (`op_idx`).
/// Recording overwrites the slot, so repeated resolution of the same occurrence
/// stays idempotent.
#[derive(Debug, Default)]
pub struct OpFctSlots {
    slots: FxHashMap<(usize, usize), FunctionId>,
}

impl OpFctSlots {
    pub fn record(&mut self, man_idx: usize, op_idx: usize, callee: FunctionId) {
        self.slots.insert((man_idx, op_idx), callee);
    }

    pub fn get(&self, man_idx: usize, op_idx: usize) -> Option<FunctionId> {
        self.slots.get(&(man_idx, op_idx)).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Binary operator expression node.
#[derive(Debug, Default)]
pub struct BinaryOpNode {
    pub span: Span,
    pub op_fct: OpFctSlots,
}

impl BinaryOpNode {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            op_fct: OpFctSlots::default(),
        }
    }
}

/// Unary operator expression node (prefix and postfix forms).
#[derive(Debug, Default)]
pub struct UnaryOpNode {
    pub span: Span,
    pub op_fct: OpFctSlots,
}

impl UnaryOpNode {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            op_fct: OpFctSlots::default(),
        }
    }
}

/// Assignment node (declaration, plain assignment, return binding, field assignment).
#[derive(Debug, Default)]
pub struct AssignNode {
    pub span: Span,
}

impl AssignNode {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

/// Explicit cast node.
#[derive(Debug, Default)]
pub struct CastNode {
    pub span: Span,
}

impl CastNode {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}
