// src/sema/mod.rs
//
// Semantic analysis: the type system, the canonical operator rule tables, and
// the checks built on top of them (operator application, overload resolution,
// assignment compatibility).

pub mod assign;
pub mod check;
pub mod functions;
pub mod op_rule_manager;
pub mod op_rules;
pub mod overload;
pub mod scope;
pub mod type_registry;
pub mod types;

pub use assign::AssignContext;
pub use check::{ExprResult, TypeChecker};
pub use functions::{Function, FunctionId, FunctionRegistry};
pub use op_rules::{BinOp, BinaryOpRule, LowOp, UnOp, UnaryOpRule};
pub use scope::{anonymous_symbol_name, FileId, Scope, SourceFile, SymbolId, SymbolTable};
pub use type_registry::{InterfaceId, StructDef, StructId, TypeId, TypeKind, TypeRegistry};
pub use types::{QualType, Qualifiers, SuperType};
