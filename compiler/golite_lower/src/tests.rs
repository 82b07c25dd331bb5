use golite_ir as ir;
use golite_runtime::{silent_handler, std_registry, NativeValue};
use golite_syntax::{
    BlockStmt, Decl, Expr, Field, File, FuncDecl, FuncType, GenDecl, Package, Stmt, Token,
};
use pretty_assertions::assert_eq;

use super::*;

fn package(decls: Vec<Decl>) -> Package {
    Package::new("main", vec![File::new("main", decls)])
}

fn lower(decls: Vec<Decl>) -> Result<ir::Package, LowerError> {
    let natives = std_registry(silent_handler());
    lower_package(&package(decls), &natives, ir::SharedInterner::new())
}

fn func(name: &str, params: Vec<Field>, body: Vec<Stmt>) -> Decl {
    Decl::Func(FuncDecl::new(name, FuncType::new(params, vec![]), body))
}

fn point_type() -> Decl {
    Decl::Gen(GenDecl::struct_type(
        "Point",
        vec![Field::group(&["x", "y"], Expr::ident("int"))],
    ))
}

/// Statements of a lowered function body.
fn body_of(pkg: &ir::Package, name: &str) -> Vec<ir::Stmt> {
    match pkg.func_named(name).map(|f| &f.body) {
        Some(ir::Stmt::Block(stmts)) => stmts.clone(),
        other => panic!("no block body for {name}: {other:?}"),
    }
}

/// Name of the native function a call expression invokes.
fn callee(expr: &ir::Expr) -> Option<String> {
    match expr {
        ir::Expr::Call { func, .. } => match &**func {
            ir::Expr::Literal(NativeValue::Func(f)) => Some(f.name().to_owned()),
            _ => None,
        },
        _ => None,
    }
}

fn call_args(expr: &ir::Expr) -> &[ir::Expr] {
    match expr {
        ir::Expr::Call { args, .. } => args,
        other => panic!("not a call: {other:?}"),
    }
}

fn ident(pkg: &ir::Package, name: &str) -> ir::Expr {
    ir::Expr::Ident(pkg.interner().intern(name))
}

#[test]
fn binary_operators_become_native_calls() {
    let pkg = lower(vec![func(
        "two",
        vec![],
        vec![Stmt::ret(vec![Expr::binary(Expr::int("1"), Token::Add, Expr::int("1"))])],
    )])
    .unwrap_or_else(|e| panic!("{e}"));

    let body = body_of(&pkg, "two");
    let [ir::Stmt::Return(results)] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    assert_eq!(callee(&results[0]).as_deref(), Some("+"));
    assert_eq!(
        call_args(&results[0]),
        &[ir::Expr::literal(1_i64), ir::Expr::literal(1_i64)]
    );
}

#[test]
fn inc_dec_lowers_target_twice() {
    let pkg = lower(vec![func(
        "f",
        vec![Field::named("i", Expr::ident("int"))],
        vec![Stmt::inc(Expr::ident("i"))],
    )])
    .unwrap_or_else(|e| panic!("{e}"));

    let body = body_of(&pkg, "f");
    let [ir::Stmt::Assign { targets, sources }] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    let i = ident(&pkg, "i");
    assert_eq!(targets, &vec![i.clone()]);
    assert_eq!(callee(&sources[0]).as_deref(), Some("+"));
    assert_eq!(call_args(&sources[0]), &[i, ir::Expr::literal(1_i64)]);
}

#[test]
fn compound_assignment_uses_operator_table() {
    let pkg = lower(vec![func(
        "f",
        vec![Field::named("x", Expr::ident("int"))],
        vec![Stmt::op_assign(Expr::ident("x"), Token::MulAssign, Expr::int("2"))],
    )])
    .unwrap_or_else(|e| panic!("{e}"));

    let body = body_of(&pkg, "f");
    let [ir::Stmt::Assign { sources, .. }] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    assert_eq!(callee(&sources[0]).as_deref(), Some("*"));
}

#[test]
fn unsupported_operators_are_named() {
    let shift = func(
        "f",
        vec![],
        vec![Stmt::expr(Expr::binary(Expr::int("1"), Token::Shl, Expr::int("2")))],
    );
    assert_eq!(
        lower(vec![shift]).err(),
        Some(LowerError::UnsupportedOperator(Token::Shl))
    );

    let and_assign = func(
        "f",
        vec![Field::named("x", Expr::ident("int"))],
        vec![Stmt::op_assign(Expr::ident("x"), Token::AndAssign, Expr::int("2"))],
    );
    assert_eq!(
        lower(vec![and_assign]).err(),
        Some(LowerError::UnsupportedOperator(Token::AndAssign))
    );
}

#[test]
fn var_declarations_assign_zero_values() {
    let pkg = lower(vec![
        point_type(),
        func(
            "f",
            vec![],
            vec![
                Stmt::Decl(GenDecl::var(&["a", "b"], Expr::ident("int"))),
                Stmt::Decl(GenDecl::var(&["p"], Expr::ident("Point"))),
                Stmt::Decl(GenDecl::var(&["s"], Expr::ident("string"))),
            ],
        ),
    ])
    .unwrap_or_else(|e| panic!("{e}"));

    let i = |n: &str| pkg.interner().intern(n);
    let zero_point = ir::Expr::StructLit {
        type_name: i("Point"),
        fields: vec![
            ir::FieldInit {
                name: i("x"),
                value: ir::Expr::literal(0_i64),
                by_reference: false,
            },
            ir::FieldInit {
                name: i("y"),
                value: ir::Expr::literal(0_i64),
                by_reference: false,
            },
        ],
    };
    assert_eq!(
        body_of(&pkg, "f"),
        vec![
            ir::Stmt::assign(
                vec![ident(&pkg, "a"), ident(&pkg, "b")],
                vec![ir::Expr::literal(0_i64), ir::Expr::literal(0_i64)],
            ),
            ir::Stmt::assign(vec![ident(&pkg, "p")], vec![zero_point]),
            ir::Stmt::assign(vec![ident(&pkg, "s")], vec![ir::Expr::literal("")]),
        ]
    );
}

#[test]
fn var_with_values_checks_counts() {
    let decl = GenDecl::new(
        golite_syntax::DeclKind::Var,
        vec![golite_syntax::Spec::Value(golite_syntax::ValueSpec {
            names: vec!["a".to_owned(), "b".to_owned()],
            ty: None,
            values: vec![Expr::int("1")],
        })],
    );
    assert_eq!(
        lower(vec![func("f", vec![], vec![Stmt::Decl(decl)])]).err(),
        Some(LowerError::AssignMismatch {
            targets: 2,
            sources: 1,
        })
    );
}

fn struct_lit_fields(pkg: &ir::Package, expr: &ir::Expr) -> Vec<(String, ir::Expr)> {
    match expr {
        ir::Expr::StructLit { fields, .. } => fields
            .iter()
            .map(|f| (pkg.resolve(f.name).to_string(), f.value.clone()))
            .collect(),
        other => panic!("not a struct literal: {other:?}"),
    }
}

fn lowered_literal(elts: Vec<Expr>) -> (ir::Package, ir::Expr) {
    let pkg = lower(vec![
        point_type(),
        func(
            "f",
            vec![],
            vec![Stmt::ret(vec![Expr::composite(Expr::ident("Point"), elts)])],
        ),
    ])
    .unwrap_or_else(|e| panic!("{e}"));
    let body = body_of(&pkg, "f");
    let [ir::Stmt::Return(results)] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    let lit = results[0].clone();
    (pkg, lit)
}

#[test]
fn struct_literals_are_always_complete() {
    let (pkg, empty) = lowered_literal(vec![]);
    assert_eq!(
        struct_lit_fields(&pkg, &empty),
        vec![
            ("x".to_owned(), ir::Expr::literal(0_i64)),
            ("y".to_owned(), ir::Expr::literal(0_i64)),
        ]
    );

    let (pkg, positional) = lowered_literal(vec![Expr::int("7")]);
    assert_eq!(
        struct_lit_fields(&pkg, &positional),
        vec![
            ("x".to_owned(), ir::Expr::literal(7_i64)),
            ("y".to_owned(), ir::Expr::literal(0_i64)),
        ]
    );

    let (pkg, keyed) = lowered_literal(vec![Expr::key_value(Expr::ident("y"), Expr::int("12"))]);
    assert_eq!(
        struct_lit_fields(&pkg, &keyed),
        vec![
            ("x".to_owned(), ir::Expr::literal(0_i64)),
            ("y".to_owned(), ir::Expr::literal(12_i64)),
        ]
    );
}

#[test]
fn pointer_fields_are_flagged() {
    // type Node struct { val int; next *Node }; return Node{}
    let pkg = lower(vec![
        Decl::Gen(GenDecl::struct_type(
            "Node",
            vec![
                Field::named("val", Expr::ident("int")),
                Field::named("next", Expr::star(Expr::ident("Node"))),
            ],
        )),
        func(
            "f",
            vec![],
            vec![Stmt::ret(vec![Expr::composite(Expr::ident("Node"), vec![])])],
        ),
    ])
    .unwrap_or_else(|e| panic!("{e}"));
    let body = body_of(&pkg, "f");
    let [ir::Stmt::Return(results)] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    let ir::Expr::StructLit { fields, .. } = &results[0] else {
        panic!("not a struct literal: {:?}", results[0]);
    };
    let flags: Vec<_> = fields
        .iter()
        .map(|f| (pkg.resolve(f.name).to_string(), f.by_reference))
        .collect();
    assert_eq!(
        flags,
        vec![("val".to_owned(), false), ("next".to_owned(), true)]
    );
    assert_eq!(fields[1].value, ir::Expr::Literal(NativeValue::Nil));
}

#[test]
fn mixed_struct_literal_keys_positional_by_index() {
    let (pkg, mixed) = lowered_literal(vec![
        Expr::key_value(Expr::ident("x"), Expr::int("1")),
        Expr::int("2"),
    ]);
    assert_eq!(
        struct_lit_fields(&pkg, &mixed),
        vec![
            ("x".to_owned(), ir::Expr::literal(1_i64)),
            ("y".to_owned(), ir::Expr::literal(2_i64)),
        ]
    );
}

#[test]
fn struct_literal_errors() {
    let bad = |elts: Vec<Expr>| {
        lower(vec![
            point_type(),
            func(
                "f",
                vec![],
                vec![Stmt::expr(Expr::composite(Expr::ident("Point"), elts))],
            ),
        ])
        .err()
    };
    assert_eq!(
        bad(vec![Expr::key_value(Expr::ident("z"), Expr::int("1"))]),
        Some(LowerError::UnknownField {
            ty: "Point".to_owned(),
            field: "z".to_owned(),
        })
    );
    assert_eq!(
        bad(vec![Expr::int("1"), Expr::int("2"), Expr::int("3")]),
        Some(LowerError::TooManyElements {
            ty: "Point".to_owned(),
            count: 3,
            fields: 2,
        })
    );
    assert_eq!(
        lower(vec![func(
            "f",
            vec![],
            vec![Stmt::expr(Expr::composite(Expr::ident("Nope"), vec![]))],
        )])
        .err(),
        Some(LowerError::UnknownStruct("Nope".to_owned()))
    );
}

#[test]
fn sequence_literals_keep_element_type() {
    let pkg = lower(vec![func(
        "f",
        vec![],
        vec![
            Stmt::expr(Expr::composite(
                Expr::slice_type(Expr::ident("int")),
                vec![Expr::int("1")],
            )),
            Stmt::expr(Expr::composite(
                Expr::array_type(Expr::int("1"), Expr::ident("int")),
                vec![Expr::int("1")],
            )),
        ],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    let int = pkg.interner().intern("int");
    assert_eq!(
        body_of(&pkg, "f"),
        vec![
            ir::Stmt::Expr(ir::Expr::SliceLit {
                elem_type: int,
                values: vec![ir::Expr::literal(1_i64)],
            }),
            ir::Stmt::Expr(ir::Expr::ArrayLit {
                elem_type: int,
                values: vec![ir::Expr::literal(1_i64)],
            }),
        ]
    );
}

#[test]
fn methods_record_receiver_kind() {
    let get = FuncDecl::method(
        Field::named("p", Expr::ident("Point")),
        "get",
        FuncType::default(),
        vec![Stmt::ret(vec![Expr::selector(Expr::ident("p"), "x")])],
    );
    let set = FuncDecl::method(
        Field::named("p", Expr::star(Expr::ident("Point"))),
        "set",
        FuncType::new(vec![Field::named("v", Expr::ident("int"))], vec![]),
        vec![Stmt::assign(
            vec![Expr::selector(Expr::ident("p"), "x")],
            vec![Expr::ident("v")],
        )],
    );
    let pkg = lower(vec![point_type(), Decl::Func(get), Decl::Func(set)])
        .unwrap_or_else(|e| panic!("{e}"));

    let i = |n: &str| pkg.interner().intern(n);
    let get = pkg.method(i("Point"), i("get")).cloned();
    let set = pkg.method(i("Point"), i("set")).cloned();
    let (Some(get), Some(set)) = (get, set) else {
        panic!("methods missing");
    };
    assert!(!get.by_reference);
    assert!(set.by_reference);
    assert_eq!(get.receiver, ir::Param::Named(i("p")));
    assert_eq!(set.func.params, vec![ir::Param::Named(i("v"))]);
    assert_eq!(
        get.func.body,
        ir::Stmt::Block(vec![ir::Stmt::Return(vec![ir::Expr::field(
            ir::Expr::Ident(i("p")),
            i("x")
        )])])
    );
    assert!(pkg.func_named("get").is_none());
}

#[test]
fn invalid_receiver_shape_fails() {
    let method = FuncDecl::method(
        Field::named("p", Expr::slice_type(Expr::ident("Point"))),
        "bad",
        FuncType::default(),
        vec![],
    );
    assert_eq!(
        lower(vec![Decl::Func(method)]).err(),
        Some(LowerError::InvalidReceiver("bad".to_owned()))
    );
}

#[test]
fn native_selectors_resolve_to_literals() {
    let pkg = lower(vec![func(
        "main",
        vec![],
        vec![Stmt::expr(Expr::call(
            Expr::selector(Expr::ident("fmt"), "Println"),
            vec![Expr::string("hi")],
        ))],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    let body = body_of(&pkg, "main");
    let [ir::Stmt::Expr(call)] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    assert_eq!(callee(call).as_deref(), Some("fmt.Println"));
    assert_eq!(call_args(call), &[ir::Expr::literal("hi")]);
}

#[test]
fn unknown_native_names_fail() {
    let select = |pkg: &str, member: &str| {
        lower(vec![func(
            "f",
            vec![],
            vec![Stmt::expr(Expr::selector(Expr::ident(pkg), member))],
        )])
        .err()
    };
    assert_eq!(
        select("os", "Exit"),
        Some(LowerError::UnknownPackage("os".to_owned()))
    );
    assert_eq!(
        select("fmt", "Printf"),
        Some(LowerError::UnknownMember {
            package: "fmt".to_owned(),
            member: "Printf".to_owned(),
        })
    );
}

#[test]
fn local_shadows_native_package() {
    let pkg = lower(vec![func(
        "f",
        vec![Field::named("fmt", Expr::ident("Point"))],
        vec![Stmt::expr(Expr::selector(Expr::ident("fmt"), "x"))],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    let i = |n: &str| pkg.interner().intern(n);
    assert_eq!(
        body_of(&pkg, "f"),
        vec![ir::Stmt::Expr(ir::Expr::field(ir::Expr::Ident(i("fmt")), i("x")))]
    );
}

#[test]
fn missing_control_parts_are_filled_in() {
    let pkg = lower(vec![func(
        "f",
        vec![],
        vec![
            Stmt::for_loop(None, None, None, vec![Stmt::break_stmt()]),
            Stmt::if_stmt(Expr::ident("true"), vec![], None),
        ],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        body_of(&pkg, "f"),
        vec![
            ir::Stmt::for_loop(
                ir::Stmt::Empty,
                ir::Expr::always(),
                ir::Stmt::Empty,
                ir::Stmt::Block(vec![ir::Stmt::Break]),
            ),
            ir::Stmt::if_else(ir::Expr::always(), ir::Stmt::Block(vec![]), ir::Stmt::Empty),
        ]
    );
}

#[test]
fn break_outside_loop_is_rejected() {
    let nested = Stmt::if_stmt(Expr::ident("true"), vec![Stmt::break_stmt()], None);
    assert_eq!(
        lower(vec![func("f", vec![], vec![nested])]).err(),
        Some(LowerError::BreakOutsideLoop)
    );
    let cont = Stmt::Branch {
        tok: Token::Continue,
        label: None,
    };
    assert_eq!(
        lower(vec![func(
            "f",
            vec![],
            vec![Stmt::for_loop(None, None, None, vec![cont])]
        )])
        .err(),
        Some(LowerError::UnsupportedBranch(Token::Continue))
    );
}

#[test]
fn unsupported_statements_are_named() {
    assert_eq!(
        lower(vec![func("f", vec![], vec![Stmt::Go(Expr::ident("g"))])]).err(),
        Some(LowerError::UnsupportedStmt("go statement"))
    );
    assert_eq!(
        lower(vec![func(
            "f",
            vec![],
            vec![Stmt::expr(Expr::lit(golite_syntax::LitKind::Float, "1.5"))]
        )])
        .err(),
        Some(LowerError::UnsupportedLiteral(golite_syntax::LitKind::Float))
    );
}

#[test]
fn named_results_are_zeroed_and_returned_bare() {
    let decl = FuncDecl::new(
        "f",
        FuncType::new(vec![], vec![Field::named("n", Expr::ident("int"))]),
        vec![Stmt::ret(vec![])],
    );
    let pkg = lower(vec![Decl::Func(decl)]).unwrap_or_else(|e| panic!("{e}"));
    let n = ident(&pkg, "n");
    assert_eq!(
        body_of(&pkg, "f"),
        vec![
            ir::Stmt::assign(vec![n.clone()], vec![ir::Expr::literal(0_i64)]),
            ir::Stmt::Return(vec![n]),
        ]
    );
}

#[test]
fn params_expand_groups_and_blanks() {
    let decl = FuncDecl::new(
        "f",
        FuncType::new(
            vec![
                Field::group(&["a", "b"], Expr::ident("int")),
                Field::named("_", Expr::ident("int")),
                Field::unnamed(Expr::ident("string")),
            ],
            vec![],
        ),
        vec![],
    );
    let pkg = lower(vec![Decl::Func(decl)]).unwrap_or_else(|e| panic!("{e}"));
    let i = |n: &str| pkg.interner().intern(n);
    let params = pkg.func_named("f").map(|f| f.params.clone());
    assert_eq!(
        params,
        Some(vec![
            ir::Param::Named(i("a")),
            ir::Param::Named(i("b")),
            ir::Param::Blank,
            ir::Param::Blank,
        ])
    );
}

#[test]
fn predeclared_constants_unless_shadowed() {
    let pkg = lower(vec![func(
        "f",
        vec![],
        vec![
            Stmt::expr(Expr::ident("nil")),
            Stmt::define("true", Expr::int("1")),
            Stmt::expr(Expr::ident("true")),
        ],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    let t = ident(&pkg, "true");
    assert_eq!(
        body_of(&pkg, "f"),
        vec![
            ir::Stmt::Expr(ir::Expr::Literal(NativeValue::Nil)),
            ir::Stmt::assign(vec![t.clone()], vec![ir::Expr::literal(1_i64)]),
            ir::Stmt::Expr(t),
        ]
    );
}

#[test]
fn unary_operators_desugar() {
    let pkg = lower(vec![func(
        "f",
        vec![Field::named("x", Expr::ident("int"))],
        vec![
            Stmt::expr(Expr::unary(Token::Sub, Expr::ident("x"))),
            Stmt::expr(Expr::unary(Token::Not, Expr::ident("x"))),
            Stmt::expr(Expr::paren(Expr::unary(Token::Add, Expr::ident("x")))),
        ],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    let x = ident(&pkg, "x");
    let body = body_of(&pkg, "f");
    let [ir::Stmt::Expr(neg), ir::Stmt::Expr(not), ir::Stmt::Expr(plus)] = body.as_slice() else {
        panic!("unexpected body {body:?}");
    };
    assert_eq!(callee(neg).as_deref(), Some("-"));
    assert_eq!(call_args(neg), &[ir::Expr::literal(0_i64), x.clone()]);
    assert_eq!(callee(not).as_deref(), Some("=="));
    assert_eq!(call_args(not), &[x.clone(), ir::Expr::literal(false)]);
    assert_eq!(plus, &x);
}

#[test]
fn package_level_vars_are_rejected() {
    let var = Decl::Gen(GenDecl::var(&["counter"], Expr::ident("int")));
    assert_eq!(
        lower(vec![var]).err(),
        Some(LowerError::PackageLevelVar("counter".to_owned()))
    );
}

#[test]
fn imports_are_ignored_and_bodyless_funcs_fail() {
    let decl = FuncDecl {
        body: None,
        ..FuncDecl::new("ext", FuncType::default(), vec![])
    };
    assert_eq!(
        lower(vec![Decl::Gen(GenDecl::import("fmt")), Decl::Func(decl)]).err(),
        Some(LowerError::MissingBody("ext".to_owned()))
    );
    assert!(lower(vec![Decl::Gen(GenDecl::import("fmt"))]).is_ok());
}

#[test]
fn preseeded_structs_are_visible() {
    let natives = std_registry(silent_handler());
    let mut structs = StructRegistry::default();
    structs.insert(
        "Pair".to_owned(),
        StructDef::from_fields("Pair", &[Field::group(&["a", "b"], Expr::ident("bool"))])
            .unwrap_or_else(|e| panic!("{e}")),
    );
    let mut compiler = Compiler::new(&natives, ir::SharedInterner::new()).with_structs(structs);
    let pkg = compiler
        .compile_package(&package(vec![func(
            "f",
            vec![],
            vec![Stmt::Decl(GenDecl::var(&["p"], Expr::ident("Pair")))],
        )]))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(body_of(&pkg, "f").len(), 1);
    assert!(compiler.structs().contains_key("Pair"));
}

#[test]
fn embedded_fields_are_rejected() {
    assert_eq!(
        StructDef::from_fields("T", &[Field::unnamed(Expr::star(Expr::ident("Base")))]),
        Err(LowerError::EmbeddedField {
            ty: "T".to_owned(),
            field: "*Base".to_owned(),
        })
    );
}

#[test]
fn block_bodies_stay_nested() {
    let pkg = lower(vec![func(
        "f",
        vec![],
        vec![Stmt::Block(BlockStmt::new(vec![Stmt::Empty]))],
    )])
    .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        body_of(&pkg, "f"),
        vec![ir::Stmt::Block(vec![ir::Stmt::Empty])]
    );
}
