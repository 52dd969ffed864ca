// src/sema/scope.rs
//
// Symbol table entries, lexical scopes, and source-file records. The operator
// machinery needs three things from here: symbol identity for lvalue tracking,
// anonymous entries for destruction-tracked temporaries, and exported-name
// lookups for cross-file overload resolution.

use rustc_hash::{FxHashMap, FxHashSet};

use super::functions::FunctionId;
use super::types::QualType;
use crate::frontend::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: QualType,
    pub moved: bool,
    pub anonymous: bool,
}

/// Flat arena of symbol entries. Scopes map names to ids into this arena so
/// expression results can carry a Copy id instead of a borrow.
#[derive(Default)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: QualType, anonymous: bool) -> SymbolId {
        let id = SymbolId(self.entries.len() as u32);
        self.entries.push(SymbolEntry {
            name: name.into(),
            ty,
            moved: false,
            anonymous,
        });
        id
    }

    pub fn get(&self, id: SymbolId) -> &SymbolEntry {
        &self.entries[id.index()]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut SymbolEntry {
        &mut self.entries[id.index()]
    }

    pub fn is_anonymous(&self, id: SymbolId) -> bool {
        self.get(id).anonymous
    }

    /// Mark a heap value as moved out of its binding.
    pub fn mark_moved(&mut self, id: SymbolId) {
        self.get_mut(id).moved = true;
    }
}

/// One lexical scope: a name-to-symbol map over the shared table.
#[derive(Default)]
pub struct Scope {
    symbols: FxHashMap<String, SymbolId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: &mut SymbolTable, name: &str, ty: QualType) -> SymbolId {
        let id = table.insert(name, ty, false);
        self.symbols.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    /// Insert a destruction-tracked anonymous entry. Re-visiting the same
    /// expression must not pile up duplicates, so an existing entry under the
    /// same name is reused with its type refreshed.
    pub fn insert_anonymous(
        &mut self,
        table: &mut SymbolTable,
        name: &str,
        ty: QualType,
    ) -> SymbolId {
        if let Some(id) = self.lookup(name) {
            let entry = table.get_mut(id);
            entry.ty = ty;
            entry.moved = false;
            return id;
        }
        let id = table.insert(name, ty, true);
        self.symbols.insert(name.to_string(), id);
        id
    }
}

/// Stable name for a destruction-tracked temporary. Derived from the source
/// position and operator index so the checker and the code generator agree on
/// the entry without sharing state.
pub fn anonymous_symbol_name(span: Span, op_idx: usize) -> String {
    format!("anon.{}.{}", span.offset, op_idx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u32);

impl FileId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-file registration: exported names for the cheap pre-filter, declared
/// functions, and the import list searched during overload resolution.
pub struct SourceFile {
    pub name: String,
    pub exported_names: FxHashSet<String>,
    pub functions: Vec<FunctionId>,
    pub imports: Vec<FileId>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exported_names: FxHashSet::default(),
            functions: Vec::new(),
            imports: Vec::new(),
        }
    }
}
