// src/sema/functions.rs
//
// Function records and the registry consulted during operator-overload
// resolution. Matching is strict: no implicit conversions, only exact type
// matches or binding a value to a (const) reference parameter.

use smallvec::SmallVec;

use super::scope::FileId;
use super::type_registry::TypeRegistry;
use super::types::QualType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(u32);

impl FunctionId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: SmallVec<[QualType; 4]>,
    pub return_type: QualType,
    pub is_procedure: bool,
    pub is_public: bool,
    /// Whether this function's body has been type-checked yet. Calling into a
    /// not-yet-checked function requires a re-visit of the calling expression.
    pub body_checked: bool,
    pub file: FileId,
}

impl Function {
    /// Display signature for diagnostics, e.g. `op.plus(Vec3&, Vec3&)`.
    pub fn signature(&self, types: &TypeRegistry) -> String {
        let params: Vec<String> = self.params.iter().map(|p| types.display(*p)).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    pub fn param_is_ref(&self, idx: usize, types: &TypeRegistry) -> bool {
        self.params
            .get(idx)
            .map(|p| p.is_ref(types))
            .unwrap_or(false)
    }
}

#[derive(Default)]
pub struct FunctionRegistry {
    functions: Vec<Function>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, function: Function) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(function);
        id
    }

    pub fn get(&self, id: FunctionId) -> &Function {
        &self.functions[id.index()]
    }

    pub fn get_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    /// Find a function by name and argument types among the candidates of one
    /// file. An argument matches a parameter if the bare types are identical
    /// (top-level constness aside) or the parameter is a reference to a
    /// matching type.
    pub fn match_in_file(
        &self,
        candidates: &[FunctionId],
        name: &str,
        args: &[QualType],
        types: &TypeRegistry,
    ) -> Option<FunctionId> {
        candidates.iter().copied().find(|&id| {
            let function = self.get(id);
            function.name == name
                && function.params.len() == args.len()
                && function
                    .params
                    .iter()
                    .zip(args)
                    .all(|(param, arg)| param_accepts(*param, *arg, types))
        })
    }
}

fn param_accepts(param: QualType, arg: QualType, types: &TypeRegistry) -> bool {
    let arg = arg.strip_ref(types);
    if param.is_ref(types) {
        match param.contained(types) {
            Some(inner) => inner.matches(&arg, true),
            None => false,
        }
    } else {
        param.matches(&arg, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sema::types::SuperType;
    use smallvec::smallvec;

    fn int_plus(types: &TypeRegistry, file: FileId) -> Function {
        Function {
            name: "op.plus".to_string(),
            params: smallvec![types.qt(SuperType::Int), types.qt(SuperType::Int)],
            return_type: types.qt(SuperType::Int),
            is_procedure: false,
            is_public: true,
            body_checked: true,
            file,
        }
    }

    #[test]
    fn exact_match_ignores_top_level_const() {
        let types = TypeRegistry::new();
        let mut registry = FunctionRegistry::new();
        let file = FileId::from_raw(0);
        let id = registry.register(int_plus(&types, file));
        let args = [
            types.qt(SuperType::Int).with_const(true),
            types.qt(SuperType::Int),
        ];
        assert_eq!(
            registry.match_in_file(&[id], "op.plus", &args, &types),
            Some(id)
        );
    }

    #[test]
    fn arity_and_name_must_match() {
        let types = TypeRegistry::new();
        let mut registry = FunctionRegistry::new();
        let id = registry.register(int_plus(&types, FileId::from_raw(0)));
        let one_arg = [types.qt(SuperType::Int)];
        assert_eq!(registry.match_in_file(&[id], "op.plus", &one_arg, &types), None);
        let two_args = [types.qt(SuperType::Int), types.qt(SuperType::Int)];
        assert_eq!(registry.match_in_file(&[id], "op.minus", &two_args, &types), None);
    }

    #[test]
    fn ref_param_binds_matching_value() {
        let mut types = TypeRegistry::new();
        let mut registry = FunctionRegistry::new();
        let int = types.qt(SuperType::Int);
        let int_ref = QualType::new(types.ref_to(int.ty)).with_const(true);
        let id = registry.register(Function {
            name: "op.plusequals".to_string(),
            params: smallvec![int_ref, int],
            return_type: int,
            is_procedure: false,
            is_public: false,
            body_checked: false,
            file: FileId::from_raw(0),
        });
        let args = [int, int];
        assert_eq!(
            registry.match_in_file(&[id], "op.plusequals", &args, &types),
            Some(id)
        );
        // A long does not bind to an int reference.
        let wrong = [types.qt(SuperType::Long), int];
        assert_eq!(
            registry.match_in_file(&[id], "op.plusequals", &wrong, &types),
            None
        );
    }

    #[test]
    fn signature_display() {
        let types = TypeRegistry::new();
        let f = int_plus(&types, FileId::from_raw(0));
        assert_eq!(f.signature(&types), "op.plus(int, int)");
    }
}
