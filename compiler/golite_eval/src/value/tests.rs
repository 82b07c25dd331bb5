use super::*;
use golite_ir::{SharedInterner, Stmt};
use golite_runtime::Sequence;
use pretty_assertions::assert_eq;

fn point(interner: &SharedInterner, x: i64, y: i64) -> StructValue {
    StructValue::new(
        interner.intern("Point"),
        vec![
            (interner.intern("x"), Value::int(x)),
            (interner.intern("y"), Value::int(y)),
        ],
    )
}

#[test]
fn struct_handles_alias() {
    let interner = SharedInterner::new();
    let x = interner.intern("x");
    let p = point(&interner, 1, 2);
    let alias = p.clone();
    assert!(alias.set_field(x, Value::int(9)));
    assert_eq!(p.field(x), Some(Value::int(9)));
    assert!(p.same_handle(&alias));
}

#[test]
fn struct_copy_is_independent() {
    let interner = SharedInterner::new();
    let x = interner.intern("x");
    let p = point(&interner, 1, 2);
    let copy = p.copy();
    copy.set_field(x, Value::int(9));
    assert_eq!(p.field(x), Some(Value::int(1)));
    assert!(!p.same_handle(&copy));
    assert_eq!(copy.type_name(), p.type_name());
}

#[test]
fn nested_structs_are_copied_recursively() {
    let interner = SharedInterner::new();
    let inner = interner.intern("inner");
    let x = interner.intern("x");
    let outer = StructValue::new(
        interner.intern("Outer"),
        vec![(inner, Value::Struct(point(&interner, 1, 2)))],
    );
    let copy = outer.copy();
    if let Some(Value::Struct(p)) = copy.field(inner) {
        p.set_field(x, Value::int(7));
    }
    let original_x = outer
        .field(inner)
        .and_then(|v| v.as_struct().and_then(|p| p.field(x)));
    assert_eq!(original_x, Some(Value::int(1)));
}

#[test]
fn pointer_fields_are_shared_on_copy() {
    let interner = SharedInterner::new();
    let p = interner.intern("p");
    let x = interner.intern("x");
    let target = point(&interner, 1, 2);
    let outer = StructValue::with_fields(
        interner.intern("Outer"),
        vec![StructField::pointer(p, Value::Struct(target.clone()))],
    );
    let copy = outer.copy();
    let shared = copy.field(p).and_then(|v| v.as_struct().cloned());
    assert!(shared.is_some_and(|s| s.same_handle(&target)));
    if let Some(Value::Struct(s)) = copy.field(p) {
        s.set_field(x, Value::int(9));
    }
    assert_eq!(target.field(x), Some(Value::int(9)));
}

#[test]
fn self_referencing_struct_copies_and_prints() {
    let interner = SharedInterner::new();
    let next = interner.intern("next");
    let node = StructValue::with_fields(
        interner.intern("Node"),
        vec![
            StructField::new(interner.intern("val"), Value::int(7)),
            StructField::pointer(next, Value::nil()),
        ],
    );
    node.set_field(next, Value::Struct(node.clone()));

    let copy = node.copy();
    assert!(!copy.same_handle(&node));
    assert!(copy
        .field(next)
        .is_some_and(|v| v.as_struct().is_some_and(|s| s.same_handle(&node))));

    let shown = node.to_string();
    assert!(shown.starts_with("{7 0x"), "{shown}");
}

#[test]
fn value_field_cycles_terminate() {
    // Only reachable by assigning a struct into its own value field.
    let interner = SharedInterner::new();
    let me = interner.intern("me");
    let s = StructValue::new(interner.intern("Loop"), vec![(me, Value::nil())]);
    s.set_field(me, Value::Struct(s.clone()));

    let copy = s.copy();
    assert!(!copy.same_handle(&s));
    assert!(copy
        .field(me)
        .is_some_and(|v| v.as_struct().is_some_and(|inner| inner.same_handle(&copy))));
    assert_eq!(s.to_string(), "{{...}}");
}

#[test]
fn slice_fields_keep_sharing_on_copy() {
    let interner = SharedInterner::new();
    let items = interner.intern("items");
    let seq = Sequence::slice(vec![NativeValue::Int(1)]);
    let holder = StructValue::new(
        interner.intern("Holder"),
        vec![(items, Value::Native(NativeValue::Seq(seq.clone())))],
    );
    let copy = holder.copy();
    if let Some(Value::Native(NativeValue::Seq(s))) = copy.field(items) {
        s.set(0, NativeValue::Int(5)).ok();
    }
    assert_eq!(seq.get(0), Ok(NativeValue::Int(5)));
}

#[test]
fn unknown_fields_are_not_set() {
    let interner = SharedInterner::new();
    let p = point(&interner, 1, 2);
    assert!(!p.set_field(interner.intern("z"), Value::int(0)));
    assert!(!p.has_field(interner.intern("z")));
    assert_eq!(p.field_names().len(), 2);
}

#[test]
fn display_matches_go() {
    let interner = SharedInterner::new();
    assert_eq!(Value::Struct(point(&interner, 1, 2)).to_string(), "{1 2}");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(Value::nil().to_string(), "<nil>");
}

#[test]
fn function_copies_share_bound_variables() {
    let interner = SharedInterner::new();
    let recv = interner.intern("r");
    let decl = Rc::new(FuncDecl {
        name: interner.intern("f"),
        params: vec![],
        body: Stmt::Empty,
    });
    let mut bound = FxHashMap::default();
    bound.insert(recv, Value::int(1));
    let f = Value::Function(FunctionValue::with_bound(decl, bound));
    let copy = f.copy();
    assert_eq!(f, copy);
    let (Value::Function(a), Value::Function(b)) = (&f, &copy) else {
        panic!("copy changed kind");
    };
    assert!(Rc::ptr_eq(&a.bound, &b.bound));
    assert_eq!(b.bound(recv), Some(&Value::int(1)));
}

#[test]
fn natives_convert() {
    assert_eq!(Value::int(3).into_native(), Some(NativeValue::Int(3)));
    assert_eq!(Value::bool(true).type_name(), "bool");
    let interner = SharedInterner::new();
    assert_eq!(Value::Struct(point(&interner, 0, 0)).as_native(), None);
}
