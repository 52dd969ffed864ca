// tests/consistency.rs
//
// Sweeps every row of every operator table through the instruction selector
// inside real JIT functions. Any row the checker can match must have an
// emission branch, and the emitted code must pass Cranelift's verifier when
// the function is defined.

use rustc_hash::FxHashMap;

use spicec::codegen::{ExprValue, JitContext, SemaRefs};
use spicec::frontend::{BinaryOpNode, CastNode, Span, UnaryOpNode};
use spicec::sema::op_rules::{ALL_BIN_OPS, ALL_UN_OPS, CAST_OP_RULES};
use spicec::sema::{QualType, SuperType, TypeChecker, TypeKind};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn operand_types(checker: &mut TypeChecker) -> FxHashMap<SuperType, QualType> {
    let mut map = FxHashMap::default();
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
        map.insert(st, checker.types.qt(st));
    }
    let int = checker.types.primitive(SuperType::Int);
    map.insert(
        SuperType::Ptr,
        QualType::new(checker.types.ptr_to(int)),
    );
    map.insert(
        SuperType::Function,
        QualType::new(checker.types.intern(TypeKind::Function {
            params: vec![],
            ret: int,
        })),
    );
    map.insert(
        SuperType::Procedure,
        QualType::new(checker.types.intern(TypeKind::Procedure { params: vec![] })),
    );
    map
}

#[test]
fn every_binary_row_selects_and_verifies() {
    init_logging();
    let mut checker = TypeChecker::new();
    let operands = operand_types(&mut checker);
    let sema = SemaRefs::from_checker(&checker);
    let mut jit = JitContext::new().expect("jit context");

    for (family_idx, op) in ALL_BIN_OPS.iter().enumerate() {
        let rows = op.rules().to_vec();
        let name = format!("consistency.bin.{family_idx}");
        jit.compile_function(&name, &[], None, &sema, |cg, _| {
            for row in &rows {
                let lhs_ty = *operands
                    .get(&row.lhs)
                    .unwrap_or_else(|| panic!("no operand for {:?}", row.lhs));
                let rhs_ty = *operands
                    .get(&row.rhs)
                    .unwrap_or_else(|| panic!("no operand for {:?}", row.rhs));
                let mut lhs = ExprValue::from_const(1, lhs_ty);
                let mut rhs = ExprValue::from_const(1, rhs_ty);
                let node = BinaryOpNode::new(Span::new(0, 1));
                cg.binary_inst(&node, *op, &mut lhs, &mut rhs, 0)
                    .unwrap_or_else(|e| {
                        panic!("{:?} row {:?}/{:?} failed: {e}", op, row.lhs, row.rhs)
                    });
            }
            Ok(None)
        })
        .unwrap_or_else(|e| panic!("{:?} family failed to define: {e}", op));
    }
}

#[test]
fn every_unary_row_selects_and_verifies() {
    init_logging();
    let mut checker = TypeChecker::new();
    let operands = operand_types(&mut checker);
    let sema = SemaRefs::from_checker(&checker);
    let mut jit = JitContext::new().expect("jit context");

    for (family_idx, op) in ALL_UN_OPS.iter().enumerate() {
        let rows = op.rules().to_vec();
        let name = format!("consistency.un.{family_idx}");
        jit.compile_function(&name, &[], None, &sema, |cg, _| {
            for row in &rows {
                let operand_ty = *operands
                    .get(&row.operand)
                    .unwrap_or_else(|| panic!("no operand for {:?}", row.operand));
                let mut operand = ExprValue::from_const(1, operand_ty);
                let node = UnaryOpNode::new(Span::new(0, 1));
                cg.unary_inst(&node, *op, &mut operand, 0)
                    .unwrap_or_else(|e| panic!("{:?} row {:?} failed: {e}", op, row.operand));
            }
            Ok(None)
        })
        .unwrap_or_else(|e| panic!("{:?} family failed to define: {e}", op));
    }
}

#[test]
fn every_cast_row_selects_and_verifies() {
    init_logging();
    let mut checker = TypeChecker::new();
    let operands = operand_types(&mut checker);
    let sema = SemaRefs::from_checker(&checker);
    let mut jit = JitContext::new().expect("jit context");

    let rows = CAST_OP_RULES.to_vec();
    jit.compile_function("consistency.cast", &[], None, &sema, |cg, _| {
        for row in &rows {
            let target = *operands
                .get(&row.lhs)
                .unwrap_or_else(|| panic!("no operand for {:?}", row.lhs));
            let source = *operands
                .get(&row.rhs)
                .unwrap_or_else(|| panic!("no operand for {:?}", row.rhs));
            let mut rhs = ExprValue::from_const(1, source);
            let node = CastNode::new(Span::new(0, 1));
            cg.cast_inst(&node, target, &mut rhs)
                .unwrap_or_else(|e| panic!("cast {:?} <- {:?} failed: {e}", row.lhs, row.rhs));
        }
        Ok(None)
    })
    .expect("cast family failed to define");
}
