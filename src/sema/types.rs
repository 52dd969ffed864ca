// src/sema/types.rs
//
// Coarse type categories and qualified types. A QualType is a Copy pair of an
// interned TypeId plus value qualifiers; it always resolves to exactly one
// SuperType through the registry.

use super::type_registry::{TypeId, TypeKind, TypeRegistry};

/// Coarse type category used as the key for operator-table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuperType {
    Double,
    Int,
    Short,
    Long,
    Byte,
    Char,
    String,
    Bool,
    Ptr,
    Ref,
    Array,
    Struct,
    Interface,
    Function,
    Procedure,
    Generic,
    Dyn,
    Invalid,
}

impl SuperType {
    /// Display name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SuperType::Double => "double",
            SuperType::Int => "int",
            SuperType::Short => "short",
            SuperType::Long => "long",
            SuperType::Byte => "byte",
            SuperType::Char => "char",
            SuperType::String => "string",
            SuperType::Bool => "bool",
            SuperType::Ptr => "ptr",
            SuperType::Ref => "ref",
            SuperType::Array => "array",
            SuperType::Struct => "struct",
            SuperType::Interface => "interface",
            SuperType::Function => "function",
            SuperType::Procedure => "procedure",
            SuperType::Generic => "generic",
            SuperType::Dyn => "dyn",
            SuperType::Invalid => "invalid",
        }
    }

    /// True for categories that intern as standalone primitive kinds.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            SuperType::Double
                | SuperType::Int
                | SuperType::Short
                | SuperType::Long
                | SuperType::Byte
                | SuperType::Char
                | SuperType::String
                | SuperType::Bool
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SuperType::Double | SuperType::Int | SuperType::Short | SuperType::Long | SuperType::Byte
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SuperType::Int | SuperType::Short | SuperType::Long | SuperType::Byte | SuperType::Char
        )
    }
}

/// Value qualifiers attached to a type. Signedness defaults to signed; it never
/// changes which table row matches, only which low-level op is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_signed: bool,
    pub is_heap: bool,
    pub is_public: bool,
}

impl Qualifiers {
    pub fn signed() -> Self {
        Self {
            is_const: false,
            is_signed: true,
            is_heap: false,
            is_public: false,
        }
    }

    pub fn is_unsigned(&self) -> bool {
        !self.is_signed
    }
}

impl Default for Qualifiers {
    fn default() -> Self {
        Self::signed()
    }
}

/// A type together with its qualifiers. Wrapped types (pointer-to, array-of,
/// reference-to) are chains of interned TypeIds, so QualType stays Copy and
/// structural equality is id equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualType {
    pub ty: TypeId,
    pub qualifiers: Qualifiers,
}

impl QualType {
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.qualifiers.is_const = is_const;
        self
    }

    pub fn with_heap(mut self, is_heap: bool) -> Self {
        self.qualifiers.is_heap = is_heap;
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.qualifiers.is_signed = false;
        self
    }

    pub fn super_type(&self, types: &TypeRegistry) -> SuperType {
        types.super_type(self.ty)
    }

    pub fn is(&self, types: &TypeRegistry, st: SuperType) -> bool {
        self.super_type(types) == st
    }

    pub fn is_ptr(&self, types: &TypeRegistry) -> bool {
        self.is(types, SuperType::Ptr)
    }

    pub fn is_ref(&self, types: &TypeRegistry) -> bool {
        self.is(types, SuperType::Ref)
    }

    pub fn is_array(&self, types: &TypeRegistry) -> bool {
        self.is(types, SuperType::Array)
    }

    /// The wrapped type of a pointer/reference/array, with this type's
    /// qualifiers carried along (minus heap, which belongs to the outer chain).
    pub fn contained(&self, types: &TypeRegistry) -> Option<QualType> {
        types.contained(self.ty).map(|inner| QualType {
            ty: inner,
            qualifiers: Qualifiers {
                is_heap: false,
                ..self.qualifiers
            },
        })
    }

    /// Strip one reference wrapper, if present. Operand types are always
    /// de-referenced before table matching.
    pub fn strip_ref(&self, types: &TypeRegistry) -> QualType {
        if self.is_ref(types) {
            self.contained(types).unwrap_or(*self)
        } else {
            *self
        }
    }

    /// Structural match on the bare type, optionally ignoring qualifiers.
    pub fn matches(&self, other: &QualType, ignore_qualifiers: bool) -> bool {
        if self.ty != other.ty {
            return false;
        }
        ignore_qualifiers || self.qualifiers == other.qualifiers
    }

    /// Pointer-chain depth and base type: `int**` yields (2, int).
    pub fn ptr_depth(&self, types: &TypeRegistry) -> (usize, QualType) {
        let mut depth = 0;
        let mut current = *self;
        while matches!(
            types.kind(current.ty),
            TypeKind::Ptr(_) | TypeKind::Ref(_)
        ) {
            match current.contained(types) {
                Some(inner) => {
                    depth += 1;
                    current = inner;
                }
                None => break,
            }
        }
        (depth, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_type_predicates() {
        assert!(SuperType::Int.is_numeric());
        assert!(SuperType::Double.is_numeric());
        assert!(!SuperType::String.is_numeric());
        assert!(SuperType::Char.is_integer());
        assert!(!SuperType::Double.is_integer());
        assert!(SuperType::Bool.is_primitive());
        assert!(!SuperType::Ptr.is_primitive());
    }

    #[test]
    fn qualifiers_default_signed() {
        let q = Qualifiers::default();
        assert!(q.is_signed);
        assert!(!q.is_unsigned());
        assert!(!q.is_const);
    }

    #[test]
    fn strip_ref_passes_through_non_refs() {
        let mut types = TypeRegistry::new();
        let int = types.qt(SuperType::Int);
        assert_eq!(int.strip_ref(&types), int);
        let int_ref = QualType::new(types.ref_to(int.ty));
        assert_eq!(int_ref.strip_ref(&types).ty, int.ty);
    }

    #[test]
    fn ptr_depth_counts_chain() {
        let mut types = TypeRegistry::new();
        let int = types.qt(SuperType::Int);
        let p = types.ptr_to(int.ty);
        let pp = QualType::new(types.ptr_to(p));
        let (depth, base) = pp.ptr_depth(&types);
        assert_eq!(depth, 2);
        assert_eq!(base.ty, int.ty);
    }
}
