// src/sema/check.rs
//
// Type checker state shared by the operator checks, the overload resolver, and
// the assignment compatibility pass. Soft errors accumulate here per sweep and
// are drained in batch; hard errors abort via Result.

use crate::errors::{SemanticError, SoftError};
use crate::frontend::Span;

use super::functions::{Function, FunctionId, FunctionRegistry};
use super::scope::{FileId, Scope, SourceFile, SymbolId, SymbolTable};
use super::type_registry::TypeRegistry;
use super::types::QualType;

/// Result of checking one expression: its type plus, when the expression
/// denotes a named or tracked value, the symbol entry behind it. Temporaries
/// carry no entry (or an anonymous one for destruction tracking).
#[derive(Debug, Clone, Copy)]
pub struct ExprResult {
    pub ty: QualType,
    pub entry: Option<SymbolId>,
}

impl ExprResult {
    pub fn new(ty: QualType) -> Self {
        Self { ty, entry: None }
    }

    pub fn with_entry(ty: QualType, entry: SymbolId) -> Self {
        Self {
            ty,
            entry: Some(entry),
        }
    }

    /// A value is a temporary when it has no symbol entry or only an anonymous
    /// destruction-tracking one.
    pub fn is_temporary(&self, symbols: &SymbolTable) -> bool {
        match self.entry {
            Some(id) => symbols.is_anonymous(id),
            None => true,
        }
    }
}

pub struct TypeChecker {
    pub types: TypeRegistry,
    pub symbols: SymbolTable,
    pub functions: FunctionRegistry,
    pub files: Vec<SourceFile>,
    pub current_file: FileId,
    pub current_scope: Scope,
    /// Generic substantiation pass index; disambiguates overload slots.
    pub man_idx: usize,
    pub in_unsafe_block: bool,
    /// Set when an overload target's body has not been checked yet; the caller
    /// schedules another sweep over the current function.
    pub revisit_requested: bool,
    soft_errors: Vec<SoftError>,
}

impl TypeChecker {
    pub fn new() -> Self {
        let mut checker = Self {
            types: TypeRegistry::new(),
            symbols: SymbolTable::new(),
            functions: FunctionRegistry::new(),
            files: Vec::new(),
            current_file: FileId::from_raw(0),
            current_scope: Scope::new(),
            man_idx: 0,
            in_unsafe_block: false,
            revisit_requested: false,
            soft_errors: Vec::new(),
        };
        checker.files.push(SourceFile::new("<main>"));
        checker
    }

    pub fn add_file(&mut self, name: &str) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(name));
        id
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.index()]
    }

    pub fn file_mut(&mut self, id: FileId) -> &mut SourceFile {
        &mut self.files[id.index()]
    }

    /// Register a function in a file, updating the file's exported-name set.
    pub fn register_function(&mut self, file: FileId, function: Function) -> FunctionId {
        let name = function.name.clone();
        let id = self.functions.register(function);
        let record = self.file_mut(file);
        record.functions.push(id);
        record.exported_names.insert(name);
        id
    }

    pub fn soft_error(&mut self, error: SemanticError, span: Span) {
        self.soft_errors.push(SoftError::new(error, span));
    }

    pub fn soft_errors(&self) -> &[SoftError] {
        &self.soft_errors
    }

    /// Drain collected soft errors; the per-file sweep calls this once the
    /// sweep completes and reports the batch.
    pub fn check_for_soft_errors(&mut self) -> Vec<SoftError> {
        std::mem::take(&mut self.soft_errors)
    }

    pub fn display(&self, ty: QualType) -> String {
        self.types.display(ty)
    }

    pub fn display_pair(&self, lhs: QualType, rhs: QualType) -> String {
        format!("{} and {}", self.display(lhs), self.display(rhs))
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}
