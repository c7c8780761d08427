//! End-to-end conversion scenarios.
//!
//! Each test hand-builds a source tree with explicit spans, seeds a
//! span-keyed model with exactly the answers a degraded front end would
//! give, and checks the rendered target statements together with the
//! recorded diagnostics. The scenarios cover the documented defaults:
//! the assumed-indexer heuristic, loop and switch desugarings, omitted
//! arguments, guarded event raises, and the runtime compatibility calls.

use recast_common::Span;
use recast_convert::{convert, Code, Severity, UnitConversion};
use recast_sema::{MethodSig, Param, Symbol, SymbolIndex, SymbolKind, Ty};
use recast_syntax::{cs, vb};

// ── Helpers ────────────────────────────────────────────────────────────

fn sp(start: u32, end: u32) -> Span {
    Span::new(start, end)
}

/// Wrap a statement list in `Class Class1` / `Sub TestMethod`.
fn unit_with_method(
    params: Vec<vb::ParamDecl>,
    body: Vec<vb::Stmt>,
) -> vb::CompilationUnit {
    unit_with_members(vec![vb::Member::Method(vb::MethodDecl {
        access: vb::Access::Public,
        shared: false,
        name: "TestMethod".into(),
        params,
        return_ty: None,
        body,
        span: sp(0, 0),
    })])
}

fn unit_with_body(body: Vec<vb::Stmt>) -> vb::CompilationUnit {
    unit_with_method(vec![], body)
}

fn unit_with_members(members: Vec<vb::Member>) -> vb::CompilationUnit {
    vb::CompilationUnit {
        types: vec![vb::TypeDecl {
            access: vb::Access::Public,
            name: "Class1".into(),
            members,
            span: sp(0, 0),
        }],
        span: sp(0, 0),
    }
}

/// Rendered body statements of the first method of the first class.
fn body_strings(conversion: &UnitConversion) -> Vec<String> {
    let cs::Member::Method(method) = &conversion.unit.types[0].members[0] else {
        panic!("first member is not a method");
    };
    method.body.iter().map(|s| s.to_string()).collect()
}

// ── Ambiguous parenthesized access ─────────────────────────────────────

/// A property that resolves but whose declared type does not: the
/// parenthesized access keeps the indexer default and a warning records
/// the assumption.
#[test]
fn test_unresolved_property_type_defaults_to_indexer() {
    let head_span = sp(12, 24);
    let stmt = vb::Stmt::Local {
        name: "value".into(),
        ty: None,
        init: Some(vb::Expr::paren_apply(
            vb::Expr::ident("SomeProperty", head_span),
            vec![vb::Arg::Positional(vb::Expr::int(0, sp(25, 26)))],
            sp(12, 27),
        )),
        span: sp(0, 27),
    };
    let mut model = SymbolIndex::new();
    model.define_symbol(
        head_span,
        Symbol::new("SomeProperty", SymbolKind::Property, Ty::Unknown),
    );

    let conversion = convert(&unit_with_body(vec![stmt]), &model);

    assert_eq!(body_strings(&conversion), ["var value = SomeProperty[0];"]);
    assert_eq!(conversion.diagnostics.len(), 1);
    let diagnostic = &conversion.diagnostics[0];
    assert_eq!(diagnostic.code, Code::AmbiguousTranslation);
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.span, head_span);
    assert!(diagnostic.message.contains("assumed-indexer"));
}

/// A head the model knows nothing about at all takes the same default.
#[test]
fn test_fully_unresolved_head_defaults_to_indexer() {
    let head_span = sp(12, 24);
    let stmt = vb::Stmt::Local {
        name: "value".into(),
        ty: None,
        init: Some(vb::Expr::paren_apply(
            vb::Expr::ident("SomeProperty", head_span),
            vec![vb::Arg::Positional(vb::Expr::int(0, sp(25, 26)))],
            sp(12, 27),
        )),
        span: sp(0, 27),
    };

    let conversion = convert(&unit_with_body(vec![stmt]), &SymbolIndex::new());

    assert_eq!(body_strings(&conversion), ["var value = SomeProperty[0];"]);
    assert_eq!(conversion.diagnostics.len(), 1);
    assert_eq!(conversion.diagnostics[0].code, Code::AmbiguousTranslation);
    assert!(conversion.diagnostics[0].message.contains("assumed-indexer"));
}

/// `Me.SomeProperty(0)` is the same self-member access as the bare
/// spelling, so a fully failed resolution takes the indexer default
/// there too.
#[test]
fn test_self_qualified_unresolved_head_defaults_to_indexer() {
    let head_span = sp(8, 23);
    let stmt = vb::Stmt::Assign {
        target: vb::Expr::ident("x", sp(4, 5)),
        value: vb::Expr::paren_apply(
            vb::Expr::member(vb::Expr::me(sp(8, 10)), "SomeProperty", head_span),
            vec![vb::Arg::Positional(vb::Expr::int(0, sp(24, 25)))],
            sp(8, 26),
        ),
        span: sp(4, 26),
    };

    let conversion = convert(&unit_with_body(vec![stmt]), &SymbolIndex::new());

    assert_eq!(body_strings(&conversion), ["x = this.SomeProperty[0];"]);
    assert_eq!(conversion.diagnostics.len(), 1);
    assert_eq!(conversion.diagnostics[0].code, Code::AmbiguousTranslation);
    assert_eq!(conversion.diagnostics[0].severity, Severity::Warning);
    assert_eq!(conversion.diagnostics[0].span, head_span);
}

/// A chain mixing both defaults: the resolved-but-untyped head indexes,
/// the unresolved qualified member stays a call, and the diagnostics
/// come out in source order.
#[test]
fn test_unknown_member_chain_mixes_index_and_call() {
    let inner_head_span = sp(8, 19);
    let inner = vb::Expr::paren_apply(
        vb::Expr::ident("DefaultDate", inner_head_span),
        vec![
            vb::Arg::Positional(vb::Expr::int(1, sp(20, 21))),
            vb::Arg::Positional(vb::Expr::int(2, sp(23, 24))),
            vb::Arg::Positional(vb::Expr::int(3, sp(26, 27))),
        ],
        sp(8, 28),
    );
    let outer_head_span = sp(8, 35);
    let outer = vb::Expr::paren_apply(
        vb::Expr::member(inner, "Blawer", outer_head_span),
        vec![
            vb::Arg::Positional(vb::Expr::int(1, sp(36, 37))),
            vb::Arg::Positional(vb::Expr::int(2, sp(39, 40))),
            vb::Arg::Positional(vb::Expr::int(3, sp(42, 43))),
        ],
        sp(8, 44),
    );
    let stmt = vb::Stmt::Local {
        name: "x".into(),
        ty: None,
        init: Some(outer),
        span: sp(0, 44),
    };
    let mut model = SymbolIndex::new();
    model.define_symbol(
        inner_head_span,
        Symbol::new("DefaultDate", SymbolKind::Property, Ty::Unknown),
    );

    let conversion = convert(&unit_with_body(vec![stmt]), &model);

    assert_eq!(
        body_strings(&conversion),
        ["var x = DefaultDate[1, 2, 3].Blawer(1, 2, 3);"]
    );
    let codes: Vec<Code> = conversion.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, [Code::AmbiguousTranslation, Code::UnresolvedSymbol]);
    assert_eq!(conversion.diagnostics[0].span, inner_head_span);
    assert_eq!(conversion.diagnostics[1].span, outer_head_span);
}

// ── Loops ──────────────────────────────────────────────────────────────

/// The loop target may be a member access on the instance; an undeclared
/// member is carried through uncorrected, with no converter diagnostic
/// of its own.
#[test]
fn test_loop_assigns_through_instance_member() {
    let target = vb::Expr::member(vb::Expr::me(sp(4, 6)), "Index", sp(4, 12));
    let stmt = vb::Stmt::For(vb::ForNext {
        target,
        from: vb::Expr::int(0, sp(15, 16)),
        to: vb::Expr::int(10, sp(20, 22)),
        step: None,
        body: vec![],
        span: sp(0, 30),
    });

    let conversion = convert(&unit_with_body(vec![stmt]), &SymbolIndex::new());

    assert_eq!(
        body_strings(&conversion),
        ["for (this.Index = 0; this.Index <= 10; this.Index++) { }"]
    );
    assert!(conversion.diagnostics.is_empty());
}

// ── Call statements ────────────────────────────────────────────────────

/// An omitted argument position becomes an explicit `default` so count
/// and position survive; the keyword form never records an ambiguity.
#[test]
fn test_call_statement_preserves_omitted_arguments() {
    let invocation = vb::Expr::paren_apply(
        vb::Expr::ident("mySuperFunction", sp(5, 20)),
        vec![
            vb::Arg::Positional(vb::Expr::ident("strSomething", sp(21, 33))),
            vb::Arg::Omitted { span: sp(35, 35) },
            vb::Arg::Positional(vb::Expr::ident("optionalSomething", sp(37, 54))),
        ],
        sp(5, 55),
    );
    let stmt = vb::Stmt::Call {
        invocation,
        span: sp(0, 55),
    };

    let conversion = convert(&unit_with_body(vec![stmt]), &SymbolIndex::new());

    assert_eq!(
        body_strings(&conversion),
        ["mySuperFunction(strSomething, default, optionalSomething);"]
    );
    assert!(conversion.diagnostics.is_empty());
}

/// Without the `Call` keyword an unresolved `head(args)` statement keeps
/// the standalone indexer default, escalated to an error because an
/// element access alone has no effect.
#[test]
fn test_bare_invocation_statement_takes_the_indexer_default() {
    let head_span = sp(0, 12);
    let stmt = vb::Stmt::Expr {
        expr: vb::Expr::paren_apply(
            vb::Expr::ident("SomeProperty", head_span),
            vec![vb::Arg::Positional(vb::Expr::int(0, sp(13, 14)))],
            sp(0, 15),
        ),
        span: sp(0, 15),
    };

    let conversion = convert(&unit_with_body(vec![stmt]), &SymbolIndex::new());

    assert_eq!(body_strings(&conversion), ["SomeProperty[0];"]);
    assert_eq!(conversion.diagnostics.len(), 1);
    assert_eq!(conversion.diagnostics[0].code, Code::AmbiguousTranslation);
    assert_eq!(conversion.diagnostics[0].severity, Severity::Error);
    assert_eq!(conversion.diagnostics[0].span, head_span);
    assert!(conversion.has_errors());
}

/// A literal null argument renders as `default` when the parameter type
/// is unknown and as `null` only when the parameter is a known
/// reference type.
#[test]
fn test_nothing_arguments_follow_parameter_nullability() {
    let bar_head = sp(5, 8);
    let bare = vb::Stmt::Expr {
        expr: vb::Expr::paren_apply(
            vb::Expr::ident("Bar", bar_head),
            vec![vb::Arg::Positional(vb::Expr::nothing(sp(9, 16)))],
            sp(5, 17),
        ),
        span: sp(0, 17),
    };
    let described_head = sp(25, 33);
    let described = vb::Stmt::Expr {
        expr: vb::Expr::paren_apply(
            vb::Expr::ident("Describe", described_head),
            vec![vb::Arg::Positional(vb::Expr::nothing(sp(34, 41)))],
            sp(25, 42),
        ),
        span: sp(20, 42),
    };
    let mut model = SymbolIndex::new();
    model.define_symbol(
        bar_head,
        Symbol::new("Bar", SymbolKind::Method, Ty::Unknown)
            .with_signature(MethodSig::new(vec![Param::value(Ty::Unknown)])),
    );
    model.define_symbol(
        described_head,
        Symbol::new("Describe", SymbolKind::Method, Ty::Unknown)
            .with_signature(MethodSig::new(vec![Param::value(Ty::Str)])),
    );

    let conversion = convert(&unit_with_body(vec![bare, described]), &model);

    assert_eq!(
        body_strings(&conversion),
        ["Bar(default);", "Describe(null);"]
    );
    assert!(conversion.diagnostics.is_empty());
}

/// A signature's `Out` mode spells the argument modifier, and every
/// mention of the missing type is carried verbatim with its own
/// unresolved-symbol record.
#[test]
fn test_out_parameter_spelled_from_signature() {
    let annotation_span = sp(20, 31);
    let declaration = vb::Stmt::Local {
        name: "anInstance".into(),
        ty: Some(vb::TypeName::new("MissingType", annotation_span)),
        init: None,
        span: sp(5, 31),
    };
    let try_get_span = sp(45, 62);
    let condition = vb::Expr::Unary {
        op: vb::UnaryOp::Not,
        operand: Box::new(vb::Expr::paren_apply(
            vb::Expr::member(vb::Expr::ident("pDict", sp(45, 50)), "TryGetValue", try_get_span),
            vec![
                vb::Arg::Positional(vb::Expr::ident("pKey", sp(63, 67))),
                vb::Arg::Positional(vb::Expr::ident("anInstance", sp(69, 79))),
            ],
            sp(45, 80),
        )),
        span: sp(41, 80),
    };
    let new_ty_span = sp(107, 118);
    let guard = vb::Stmt::IfGuard {
        condition,
        then_stmt: Box::new(vb::Stmt::Assign {
            target: vb::Expr::ident("anInstance", sp(90, 100)),
            value: vb::Expr::New {
                ty: vb::TypeName::new("MissingType", new_ty_span),
                args: vec![],
                span: sp(103, 118),
            },
            span: sp(90, 118),
        }),
        span: sp(38, 118),
    };
    let mut model = SymbolIndex::new();
    model.define_symbol(
        try_get_span,
        Symbol::new("TryGetValue", SymbolKind::Method, Ty::Boolean).with_signature(
            MethodSig::new(vec![Param::value(Ty::Integer), Param::out(Ty::Unknown)]),
        ),
    );

    let conversion = convert(&unit_with_body(vec![declaration, guard]), &model);

    assert_eq!(
        body_strings(&conversion),
        [
            "MissingType anInstance = default;",
            "if (!pDict.TryGetValue(pKey, out anInstance)) anInstance = new MissingType();",
        ]
    );
    let spans: Vec<Span> = conversion.diagnostics.iter().map(|d| d.span).collect();
    assert_eq!(spans, [annotation_span, new_ty_span]);
    for diagnostic in &conversion.diagnostics {
        assert_eq!(diagnostic.code, Code::UnresolvedSymbol);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.message.contains("MissingType"));
    }
}

// ── Switch desugaring ──────────────────────────────────────────────────

/// Over an enum discriminant: nonzero literal labels take the enum cast,
/// zero does not, and the else branch's enum-into-string assignment
/// routes through the explicit conversion call.
#[test]
fn test_enum_switch_casts_labels_and_converts_default_assignment() {
    let enum_ty = || Ty::Enum("PositionEnum".into());
    let param = vb::ParamDecl {
        name: "pS".into(),
        ty: vb::TypeName::new("PositionEnum", sp(20, 32)),
        by_ref: false,
        optional: false,
        span: sp(17, 32),
    };
    let body = vec![
        vb::Stmt::Local {
            name: "tS".into(),
            ty: Some(vb::TypeName::new("String", sp(50, 56))),
            init: None,
            span: sp(44, 56),
        },
        vb::Stmt::Local {
            name: "tPos".into(),
            ty: Some(vb::TypeName::new("PositionEnum", sp(70, 82))),
            init: None,
            span: sp(62, 82),
        },
        vb::Stmt::Select(vb::SelectCase {
            scrutinee: vb::Expr::ident("pS", sp(100, 102)),
            arms: vec![
                vb::CaseArm {
                    labels: vec![vb::Expr::int(0, sp(115, 116))],
                    body: vec![vb::Stmt::Assign {
                        target: vb::Expr::ident("tPos", sp(125, 129)),
                        value: vb::Expr::int(0, sp(132, 133)),
                        span: sp(125, 133),
                    }],
                    span: sp(110, 135),
                },
                vb::CaseArm {
                    labels: vec![vb::Expr::int(1, sp(145, 146))],
                    body: vec![vb::Stmt::Assign {
                        target: vb::Expr::ident("tPos", sp(155, 159)),
                        value: vb::Expr::int(1, sp(162, 163)),
                        span: sp(155, 163),
                    }],
                    span: sp(140, 165),
                },
            ],
            else_body: Some(vec![vb::Stmt::Assign {
                target: vb::Expr::ident("tS", sp(175, 177)),
                value: vb::Expr::ident("pS", sp(180, 182)),
                span: sp(175, 182),
            }]),
            span: sp(95, 190),
        }),
    ];
    let mut model = SymbolIndex::new();
    model.define_type(sp(20, 32), enum_ty());
    model.define_type(sp(50, 56), Ty::Str);
    model.define_type(sp(70, 82), enum_ty());
    model.define_type(sp(100, 102), enum_ty());
    model.define_type(sp(125, 129), enum_ty());
    model.define_type(sp(155, 159), enum_ty());
    model.define_type(sp(175, 177), Ty::Str);
    model.define_type(sp(180, 182), enum_ty());

    let conversion = convert(&unit_with_method(vec![param], body), &model);

    assert_eq!(
        body_strings(&conversion),
        [
            "string tS;",
            "var tPos = default(PositionEnum);",
            "switch (pS) { case 0: { tPos = 0; break; } \
             case (PositionEnum)1: { tPos = (PositionEnum)1; break; } \
             default: { tS = Conversions.ToString(pS); break; } }",
        ]
    );
    assert!(conversion.diagnostics.is_empty());
}

/// A discriminant with a method call behind it is hoisted into a local
/// the switch reads once.
#[test]
fn test_string_switch_hoists_computed_discriminant() {
    let param = vb::ParamDecl {
        name: "pS".into(),
        ty: vb::TypeName::new("String", sp(20, 26)),
        by_ref: false,
        optional: false,
        span: sp(17, 26),
    };
    let to_upper_span = sp(60, 70);
    let body = vec![
        vb::Stmt::Local {
            name: "tS".into(),
            ty: Some(vb::TypeName::new("String", sp(40, 46))),
            init: None,
            span: sp(34, 46),
        },
        vb::Stmt::Select(vb::SelectCase {
            scrutinee: vb::Expr::member(vb::Expr::ident("pS", sp(60, 62)), "ToUpper", to_upper_span),
            arms: vec![vb::CaseArm {
                labels: vec![vb::Expr::str("NONE", sp(85, 91))],
                body: vec![vb::Stmt::Assign {
                    target: vb::Expr::ident("tS", sp(100, 102)),
                    value: vb::Expr::str("none", sp(105, 111)),
                    span: sp(100, 111),
                }],
                span: sp(80, 115),
            }],
            else_body: None,
            span: sp(55, 120),
        }),
    ];
    let mut model = SymbolIndex::new();
    model.define_type(sp(20, 26), Ty::Str);
    model.define_type(sp(40, 46), Ty::Str);
    model.define_symbol(to_upper_span, Symbol::new("ToUpper", SymbolKind::Method, Ty::Str));
    model.define_type(to_upper_span, Ty::Str);
    model.define_type(sp(100, 102), Ty::Str);

    let conversion = convert(&unit_with_method(vec![param], body), &model);

    assert_eq!(
        body_strings(&conversion),
        [
            "string tS;",
            "var switchExpr = pS.ToUpper();",
            "switch (switchExpr) { case \"NONE\": { tS = \"none\"; break; } }",
        ]
    );
    assert!(conversion.diagnostics.is_empty());
}

// ── Guarded event raises ───────────────────────────────────────────────

/// An undeclared event behind a null guard keeps the guard and takes the
/// indexer default in statement position, escalated to an error because
/// the output cannot be valid there.
#[test]
fn test_unresolved_event_raise_keeps_guarded_indexer() {
    let head_span = sp(31, 38);
    let guard = vb::Stmt::IfGuard {
        condition: vb::Expr::Binary {
            op: vb::BinOp::IsNot,
            lhs: Box::new(vb::Expr::ident("MyEvent", sp(3, 10))),
            rhs: Box::new(vb::Expr::nothing(sp(18, 25))),
            span: sp(3, 25),
        },
        then_stmt: Box::new(vb::Stmt::Expr {
            expr: vb::Expr::paren_apply(
                vb::Expr::ident("MyEvent", head_span),
                vec![
                    vb::Arg::Positional(vb::Expr::me(sp(39, 41))),
                    vb::Arg::Positional(vb::Expr::member(
                        vb::Expr::ident("EventArgs", sp(43, 52)),
                        "Empty",
                        sp(43, 58),
                    )),
                ],
                sp(31, 59),
            ),
            span: sp(31, 59),
        }),
        span: sp(0, 59),
    };

    let conversion = convert(&unit_with_body(vec![guard]), &SymbolIndex::new());

    assert_eq!(
        body_strings(&conversion),
        ["if (MyEvent is object) MyEvent[this, EventArgs.Empty];"]
    );
    assert_eq!(conversion.diagnostics.len(), 1);
    let diagnostic = &conversion.diagnostics[0];
    assert_eq!(diagnostic.code, Code::AmbiguousTranslation);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.span, head_span);
    assert!(diagnostic.message.contains("assumed-indexer"));
    assert!(conversion.has_errors());
}

/// The same shape with a declared event collapses into the
/// null-conditional invocation.
#[test]
fn test_declared_event_raise_collapses_to_conditional_invoke() {
    let head_span = sp(31, 38);
    let guard = vb::Stmt::IfGuard {
        condition: vb::Expr::Binary {
            op: vb::BinOp::IsNot,
            lhs: Box::new(vb::Expr::ident("MyEvent", sp(3, 10))),
            rhs: Box::new(vb::Expr::nothing(sp(18, 25))),
            span: sp(3, 25),
        },
        then_stmt: Box::new(vb::Stmt::Expr {
            expr: vb::Expr::paren_apply(
                vb::Expr::ident("MyEvent", head_span),
                vec![
                    vb::Arg::Positional(vb::Expr::me(sp(39, 41))),
                    vb::Arg::Positional(vb::Expr::member(
                        vb::Expr::ident("EventArgs", sp(43, 52)),
                        "Empty",
                        sp(43, 58),
                    )),
                ],
                sp(31, 59),
            ),
            span: sp(31, 59),
        }),
        span: sp(0, 59),
    };
    let mut model = SymbolIndex::new();
    model.define_symbol(
        head_span,
        Symbol::new(
            "MyEvent",
            SymbolKind::Event,
            Ty::Delegate("MouseMovedEventHandler".into()),
        ),
    );

    let conversion = convert(&unit_with_body(vec![guard]), &model);

    assert_eq!(
        body_strings(&conversion),
        ["MyEvent?.Invoke(this, EventArgs.Empty);"]
    );
    assert!(conversion.diagnostics.is_empty());
}

// ── Runtime compatibility calls ────────────────────────────────────────

/// Recognized intrinsics rewrite to the compatibility library, and the
/// surrounding slot's coercions still apply to the rewritten call.
#[test]
fn test_intrinsic_calls_map_to_compat_helpers() {
    let body = vec![
        vb::Stmt::IfGuard {
            condition: vb::Expr::paren_apply(
                vb::Expr::ident("IsNothing", sp(3, 12)),
                vec![vb::Arg::Positional(vb::Expr::ident("target", sp(13, 19)))],
                sp(3, 20),
            ),
            then_stmt: Box::new(vb::Stmt::Return {
                value: None,
                span: sp(26, 32),
            }),
            span: sp(0, 32),
        },
        vb::Stmt::Assign {
            target: vb::Expr::ident("Ratio", sp(40, 45)),
            value: vb::Expr::paren_apply(
                vb::Expr::ident("Val", sp(48, 51)),
                vec![vb::Arg::Positional(vb::Expr::ident("pS", sp(52, 54)))],
                sp(48, 55),
            ),
            span: sp(40, 55),
        },
        vb::Stmt::Assign {
            target: vb::Expr::ident("title", sp(60, 65)),
            value: vb::Expr::paren_apply(
                vb::Expr::ident("UCase", sp(68, 73)),
                vec![vb::Arg::Positional(vb::Expr::ident("title", sp(74, 79)))],
                sp(68, 80),
            ),
            span: sp(60, 80),
        },
    ];
    let mut model = SymbolIndex::new();
    model.define_type(sp(40, 45), Ty::Single);
    model.define_type(sp(48, 55), Ty::Double);
    model.define_type(sp(60, 65), Ty::Str);
    model.define_type(sp(68, 80), Ty::Str);

    let conversion = convert(&unit_with_body(body), &model);

    assert_eq!(
        body_strings(&conversion),
        [
            "if (Information.IsNothing(target)) return;",
            "Ratio = Conversions.ToSingle(Conversion.Val(pS));",
            "title = Strings.UCase(title);",
        ]
    );
    assert!(conversion.diagnostics.is_empty());
}

/// A recognized intrinsic with no mapped equivalent is emitted unchanged
/// and flagged.
#[test]
fn test_unmapped_intrinsic_keeps_call_and_flags_gap() {
    let call_span = sp(8, 15);
    let stmt = vb::Stmt::Local {
        name: "n".into(),
        ty: None,
        init: Some(vb::Expr::paren_apply(
            vb::Expr::ident("Len", sp(8, 11)),
            vec![vb::Arg::Positional(vb::Expr::ident("pS", sp(12, 14)))],
            call_span,
        )),
        span: sp(0, 15),
    };

    let conversion = convert(&unit_with_body(vec![stmt]), &SymbolIndex::new());

    assert_eq!(body_strings(&conversion), ["var n = Len(pS);"]);
    assert_eq!(conversion.diagnostics.len(), 1);
    let diagnostic = &conversion.diagnostics[0];
    assert_eq!(diagnostic.code, Code::RuntimeMappingGap);
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.span, call_span);
    assert!(diagnostic.message.contains("`Len`"));
}

// ── Declarations ───────────────────────────────────────────────────────

/// Field initializers coerce against the declared field type; the class
/// surface renders members in declaration order.
#[test]
fn test_class_surface_renders_members() {
    let members = vec![
        vb::Member::Field(vb::FieldDecl {
            access: vb::Access::Public,
            name: "Ratio".into(),
            ty: vb::TypeName::new("Single", sp(15, 21)),
            init: Some(vb::Expr::Literal {
                value: vb::Lit::Float(0.5),
                span: sp(24, 27),
            }),
            span: sp(0, 27),
        }),
        vb::Member::Field(vb::FieldDecl {
            access: vb::Access::Public,
            name: "TitleAlign".into(),
            ty: vb::TypeName::new("PositionEnum", sp(40, 52)),
            init: Some(vb::Expr::int(2, sp(55, 56))),
            span: sp(30, 56),
        }),
        vb::Member::Property(vb::PropertyDecl {
            access: vb::Access::Public,
            name: "SomeProperty".into(),
            ty: vb::TypeName::new("String", sp(70, 76)),
            span: sp(60, 76),
        }),
    ];
    let mut model = SymbolIndex::new();
    model.define_type(sp(15, 21), Ty::Single);
    // A suffixed source literal carries its own type.
    model.define_type(sp(24, 27), Ty::Single);
    model.define_type(sp(40, 52), Ty::Enum("PositionEnum".into()));
    model.define_type(sp(70, 76), Ty::Str);

    let conversion = convert(&unit_with_members(members), &model);

    assert_eq!(
        conversion.unit.to_string(),
        "public class Class1 { \
         public float Ratio = 0.5f; \
         public PositionEnum TitleAlign = (PositionEnum)2; \
         public string SomeProperty { get; set; } }"
    );
    assert!(conversion.diagnostics.is_empty());
}

/// An enum declaration maps its underlying annotation and keeps explicit
/// variant values.
#[test]
fn test_enum_declaration_maps_underlying_type() {
    let members = vec![vb::Member::Enum(vb::EnumDecl {
        access: vb::Access::Public,
        name: "PositionEnum".into(),
        underlying: Some(vb::TypeName::new("Integer", sp(30, 37))),
        variants: vec![
            vb::EnumVariant {
                name: "None".into(),
                value: Some(0),
                span: sp(45, 53),
            },
            vb::EnumVariant {
                name: "LeftTop".into(),
                value: Some(1),
                span: sp(60, 71),
            },
            vb::EnumVariant {
                name: "RightTop".into(),
                value: Some(2),
                span: sp(78, 90),
            },
        ],
        span: sp(20, 95),
    })];
    let mut model = SymbolIndex::new();
    model.define_type(sp(30, 37), Ty::Integer);

    let conversion = convert(&unit_with_members(members), &model);

    assert_eq!(
        conversion.unit.types[0].members[0].to_string(),
        "public enum PositionEnum : int { None = 0, LeftTop = 1, RightTop = 2 }"
    );
    assert!(conversion.diagnostics.is_empty());
}
