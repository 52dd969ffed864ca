// src/frontend/mod.rs
pub mod ast;
pub mod span;

pub use ast::{AssignNode, BinaryOpNode, CastNode, OpFctSlots, UnaryOpNode};
pub use span::Span;
