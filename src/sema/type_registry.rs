// src/sema/type_registry.rs
//
// Shared type registry. Structurally-identical types are interned so a wrapped
// chain (pointer-to, array-of, reference-to) is a chain of ids, and type
// equality is id equality. Struct and interface definitions live here too so
// the assignment checker and overload resolver can consult them.

use rustc_hash::FxHashMap;

use super::types::{QualType, SuperType};

/// Index into the registry's interned kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(u32);

impl StructId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceId(u32);

impl InterfaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(SuperType),
    Ptr(TypeId),
    Ref(TypeId),
    Array(TypeId),
    Struct(StructId),
    Interface(InterfaceId),
    Function { params: Vec<TypeId>, ret: TypeId },
    Procedure { params: Vec<TypeId> },
    Generic(String),
    Dyn,
    Invalid,
}

/// Struct definition: name, implemented interfaces, and whether values need
/// destructor insertion when used as temporaries.
#[derive(Debug, Clone)]
pub struct StructDef {
    pub name: String,
    pub implements: Vec<InterfaceId>,
    pub trivially_destructible: bool,
}

#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub name: String,
}

pub struct TypeRegistry {
    kinds: Vec<TypeKind>,
    interned: FxHashMap<TypeKind, TypeId>,
    primitives: FxHashMap<SuperType, TypeId>,
    structs: Vec<StructDef>,
    interfaces: Vec<InterfaceDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            kinds: Vec::new(),
            interned: FxHashMap::default(),
            primitives: FxHashMap::default(),
            structs: Vec::new(),
            interfaces: Vec::new(),
        };
        for st in [
            SuperType::Double,
            SuperType::Int,
            SuperType::Short,
            SuperType::Long,
            SuperType::Byte,
            SuperType::Char,
            SuperType::String,
            SuperType::Bool,
        ] {
            let id = registry.intern(TypeKind::Primitive(st));
            registry.primitives.insert(st, id);
        }
        let dyn_id = registry.intern(TypeKind::Dyn);
        registry.primitives.insert(SuperType::Dyn, dyn_id);
        let invalid_id = registry.intern(TypeKind::Invalid);
        registry.primitives.insert(SuperType::Invalid, invalid_id);
        registry
    }

    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }
        let id = TypeId(self.kinds.len() as u32);
        self.kinds.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    /// Pre-interned id of a primitive (or dyn/invalid) category.
    pub fn primitive(&self, st: SuperType) -> TypeId {
        debug_assert!(
            self.primitives.contains_key(&st),
            "not a pre-interned category: {:?}",
            st
        );
        self.primitives
            .get(&st)
            .copied()
            .unwrap_or_else(|| self.primitives[&SuperType::Invalid])
    }

    /// Qualified type for a primitive category with default qualifiers.
    pub fn qt(&self, st: SuperType) -> QualType {
        QualType::new(self.primitive(st))
    }

    pub fn ptr_to(&mut self, inner: TypeId) -> TypeId {
        self.intern(TypeKind::Ptr(inner))
    }

    pub fn ref_to(&mut self, inner: TypeId) -> TypeId {
        self.intern(TypeKind::Ref(inner))
    }

    pub fn array_of(&mut self, inner: TypeId) -> TypeId {
        self.intern(TypeKind::Array(inner))
    }

    pub fn register_struct(&mut self, def: StructDef) -> (StructId, TypeId) {
        let sid = StructId(self.structs.len() as u32);
        self.structs.push(def);
        let tid = self.intern(TypeKind::Struct(sid));
        (sid, tid)
    }

    pub fn register_interface(&mut self, name: impl Into<String>) -> (InterfaceId, TypeId) {
        let iid = InterfaceId(self.interfaces.len() as u32);
        self.interfaces.push(InterfaceDef { name: name.into() });
        let tid = self.intern(TypeKind::Interface(iid));
        (iid, tid)
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.kinds[id.index()]
    }

    pub fn super_type(&self, id: TypeId) -> SuperType {
        match self.kind(id) {
            TypeKind::Primitive(st) => *st,
            TypeKind::Ptr(_) => SuperType::Ptr,
            TypeKind::Ref(_) => SuperType::Ref,
            TypeKind::Array(_) => SuperType::Array,
            TypeKind::Struct(_) => SuperType::Struct,
            TypeKind::Interface(_) => SuperType::Interface,
            TypeKind::Function { .. } => SuperType::Function,
            TypeKind::Procedure { .. } => SuperType::Procedure,
            TypeKind::Generic(_) => SuperType::Generic,
            TypeKind::Dyn => SuperType::Dyn,
            TypeKind::Invalid => SuperType::Invalid,
        }
    }

    pub fn contained(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Ptr(inner) | TypeKind::Ref(inner) | TypeKind::Array(inner) => Some(*inner),
            _ => None,
        }
    }

    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.index()]
    }

    pub fn interface_def(&self, id: InterfaceId) -> &InterfaceDef {
        &self.interfaces[id.index()]
    }

    /// Struct id of a struct-kinded type, if it is one.
    pub fn struct_id(&self, id: TypeId) -> Option<StructId> {
        match self.kind(id) {
            TypeKind::Struct(sid) => Some(*sid),
            _ => None,
        }
    }

    pub fn interface_id(&self, id: TypeId) -> Option<InterfaceId> {
        match self.kind(id) {
            TypeKind::Interface(iid) => Some(*iid),
            _ => None,
        }
    }

    pub fn struct_implements(&self, sid: StructId, iid: InterfaceId) -> bool {
        self.struct_def(sid).implements.contains(&iid)
    }

    /// Human-readable display of a qualified type, for diagnostics.
    pub fn display(&self, qt: QualType) -> String {
        let mut out = String::new();
        if qt.qualifiers.is_const {
            out.push_str("const ");
        }
        if qt.qualifiers.is_heap {
            out.push_str("heap ");
        }
        if qt.qualifiers.is_unsigned() && self.super_type(qt.ty).is_integer() {
            out.push_str("unsigned ");
        }
        out.push_str(&self.display_bare(qt.ty));
        out
    }

    fn display_bare(&self, id: TypeId) -> String {
        match self.kind(id) {
            TypeKind::Primitive(st) => st.name().to_string(),
            TypeKind::Ptr(inner) => format!("{}*", self.display_bare(*inner)),
            TypeKind::Ref(inner) => format!("{}&", self.display_bare(*inner)),
            TypeKind::Array(inner) => format!("{}[]", self.display_bare(*inner)),
            TypeKind::Struct(sid) => self.struct_def(*sid).name.clone(),
            TypeKind::Interface(iid) => self.interface_def(*iid).name.clone(),
            TypeKind::Function { params, ret } => {
                let args: Vec<String> = params.iter().map(|p| self.display_bare(*p)).collect();
                format!("f({}) -> {}", args.join(", "), self.display_bare(*ret))
            }
            TypeKind::Procedure { params } => {
                let args: Vec<String> = params.iter().map(|p| self.display_bare(*p)).collect();
                format!("p({})", args.join(", "))
            }
            TypeKind::Generic(name) => name.clone(),
            TypeKind::Dyn => "dyn".to_string(),
            TypeKind::Invalid => "invalid".to_string(),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_structural() {
        let mut types = TypeRegistry::new();
        let int = types.primitive(SuperType::Int);
        let p1 = types.ptr_to(int);
        let p2 = types.ptr_to(int);
        assert_eq!(p1, p2);
        let long = types.primitive(SuperType::Long);
        assert_ne!(types.ptr_to(long), p1);
    }

    #[test]
    fn super_type_of_wrapped_chains() {
        let mut types = TypeRegistry::new();
        let int = types.primitive(SuperType::Int);
        let ptr = types.ptr_to(int);
        let arr = types.array_of(int);
        assert_eq!(types.super_type(ptr), SuperType::Ptr);
        assert_eq!(types.super_type(arr), SuperType::Array);
        assert_eq!(types.contained(ptr), Some(int));
    }

    #[test]
    fn display_includes_qualifiers() {
        let mut types = TypeRegistry::new();
        let int = types.primitive(SuperType::Int);
        let ptr = types.ptr_to(int);
        let qt = QualType::new(ptr).with_const(true).with_heap(true);
        assert_eq!(types.display(qt), "const heap int*");
        let uns = types.qt(SuperType::Short).unsigned();
        assert_eq!(types.display(uns), "unsigned short");
    }

    #[test]
    fn struct_interface_registration() {
        let mut types = TypeRegistry::new();
        let (iid, _iface_ty) = types.register_interface("Printable");
        let (sid, struct_ty) = types.register_struct(StructDef {
            name: "Vec3".to_string(),
            implements: vec![iid],
            trivially_destructible: false,
        });
        assert!(types.struct_implements(sid, iid));
        assert_eq!(types.super_type(struct_ty), SuperType::Struct);
        assert_eq!(types.struct_id(struct_ty), Some(sid));
    }
}
