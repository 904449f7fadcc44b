// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios: analyze a document, apply the offered fix, and
//! re-analyze the result.

use std::sync::Arc;

use autoinject_core::analyzers::{all_analyzers, analyze_document};
use autoinject_core::config::AutoInjectConfig;
use autoinject_core::diagnostics::Diagnostic;
use autoinject_core::fixes::{all_fix_providers, code_actions_for};
use autoinject_core::host::{CancellationToken, Document};
use autoinject_core::semantics::{ExternalType, SymbolTable};
use autoinject_core::syntax::factory::{
    expression_statement, identifier, int, meta_attribute_list, this_call, void,
};
use autoinject_core::syntax::printer::{print_type, print_unit};
use autoinject_core::syntax::{
    ArrowBody, Block, CompilationUnit, MethodBody, MethodDeclaration, Modifier, Parameter, Span,
    Statement, Terminator, Trivia, TypeDeclaration, TypeKind, TypeSyntax,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config() -> Arc<AutoInjectConfig> {
    Arc::new(AutoInjectConfig::default())
}

/// `[Meta(typeof(IAutoNode))] public partial class <name> : Node` spanning
/// `start..start + 400`.
fn auto_node(name: &str, start: u32) -> TypeDeclaration {
    TypeDeclaration::class(name)
        .with_modifiers([Modifier::Public, Modifier::Partial])
        .with_attribute_list(meta_attribute_list("Meta", "IAutoNode", Span::new(start, start + 25)))
        .with_identifier_span(Span::new(start + 48, start + 51))
        .with_base(TypeSyntax::named("Node"))
        .with_span(Span::new(start, start + 400))
}

fn provider(name: &str, start: u32) -> TypeDeclaration {
    auto_node(name, start).with_base(TypeSyntax::generic("IProvide", vec![int()]))
}

fn notification(parameter: &str, body: MethodBody, start: u32) -> MethodDeclaration {
    MethodDeclaration::new(void(), "_Notification")
        .with_modifiers([Modifier::Public, Modifier::Override])
        .with_parameters(vec![Parameter::new(int(), parameter)])
        .with_body(body)
        .with_identifier_span(Span::new(start + 21, start + 34))
        .with_span(Span::new(start, start + 70))
}

fn forwarding(parameter: &str, start: u32) -> MethodDeclaration {
    notification(
        parameter,
        MethodBody::Expression(ArrowBody::new(this_call("Notify", vec![identifier(parameter)]))),
        start,
    )
}

fn public_method(name: &str, statements: Vec<Statement>) -> MethodDeclaration {
    MethodDeclaration::new(void(), name)
        .with_modifiers([Modifier::Public])
        .with_body(MethodBody::Block(Block::new(statements)))
}

fn document(types: Vec<TypeDeclaration>) -> Document {
    Document::new("Game.cs", CompilationUnit::new(types, Span::new(0, 2000)))
}

fn symbols(document: &Document) -> SymbolTable {
    let root = document
        .syntax_root(&CancellationToken::new())
        .expect("not cancelled")
        .expect("has root");
    SymbolTable::new()
        .with_unit(&root)
        .with_externals([ExternalType {
            name: "IProvide".into(),
            kind: TypeKind::Interface,
            arity: 1,
            bases: vec![],
        }])
}

fn analyze(document: &Document) -> Vec<Diagnostic> {
    analyze_document(
        document,
        &symbols(document),
        &all_analyzers(&config()),
        &CancellationToken::new(),
    )
}

fn ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.id.as_str()).collect()
}

/// Applies the action with `key` offered for `diagnostic`.
fn apply_fix(document: &Document, diagnostic: &Diagnostic, key: &str) -> Document {
    let cancel = CancellationToken::new();
    let actions = code_actions_for(document, diagnostic, &all_fix_providers(&config()), &cancel);
    let action = actions
        .iter()
        .find(|a| a.equivalence_key == key)
        .unwrap_or_else(|| panic!("no action {key} among {actions:?}"));
    action.apply(document, &cancel)
}

fn first_type(document: &Document) -> TypeDeclaration {
    document
        .syntax_root(&CancellationToken::new())
        .expect("not cancelled")
        .expect("has root")
        .types[0]
        .clone()
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn classes_without_meta_attribute_are_never_reported() {
    let plain = TypeDeclaration::class("Plain")
        .with_base(TypeSyntax::generic("IProvide", vec![int()]))
        .with_member(notification("what", MethodBody::Block(Block::new(vec![])), 10))
        .with_span(Span::new(0, 400));
    assert!(analyze(&document(vec![plain])).is_empty());
}

#[test]
fn unrelated_attribute_does_not_qualify() {
    let class = TypeDeclaration::class("Foo")
        .with_attribute_list(meta_attribute_list("Meta", "ISomethingElse", Span::new(0, 25)))
        .with_span(Span::new(0, 400));
    assert!(analyze(&document(vec![class])).is_empty());
}

#[test]
fn override_of_any_body_shape_satisfies_notification_check() {
    let bodies = [
        MethodBody::Block(Block::new(vec![expression_statement(this_call(
            "Notify",
            vec![identifier("what")],
        ))])),
        MethodBody::Expression(ArrowBody::new(this_call("Notify", vec![identifier("what")]))),
    ];
    for body in bodies {
        let class = auto_node("Player", 0).with_member(notification("what", body, 60));
        assert!(analyze(&document(vec![class])).is_empty());
    }
}

#[test]
fn missing_override_is_fixed_by_inserting_it_first() {
    let class = auto_node("Player", 0).with_member(public_method("OnReady", vec![]));
    let document = document(vec![class]);
    let diagnostics = analyze(&document);
    assert_eq!(ids(&diagnostics), ["AUTO_INJECT_001"]);
    assert_eq!(diagnostics[0].span, Span::new(1, 24));

    let fixed = apply_fix(&document, &diagnostics[0], "AutoInjectNotificationOverrideFix");
    insta::assert_snapshot!(print_type(&first_type(&fixed)), @r#"
    [Meta(typeof(IAutoNode))]
    public partial class Player : Node
    {
        public override void _Notification(int what) => this.Notify(what);

        public void OnReady()
        {
        }
    }
    "#);
    assert!(analyze(&fixed).is_empty());
}

#[test]
fn provider_with_empty_setup_gets_call_appended() {
    let class = provider("Foo", 0)
        .with_member(forwarding("what", 60))
        .with_member(public_method("Setup", vec![]));
    let document = document(vec![class]);
    let diagnostics = analyze(&document);
    assert_eq!(ids(&diagnostics), ["AUTO_INJECT_002"]);
    assert_eq!(diagnostics[0].span, Span::new(1, 24));

    let cancel = CancellationToken::new();
    let keys: Vec<_> = code_actions_for(
        &document,
        &diagnostics[0],
        &all_fix_providers(&config()),
        &cancel,
    )
    .into_iter()
    .map(|a| a.equivalence_key)
    .collect();
    assert!(keys.iter().any(|k| k == "AutoInjectProvideFix_AddCallTo_Setup"));
    assert!(!keys.iter().any(|k| k == "AutoInjectProvideFix_CreateNew_Setup"));

    let fixed = apply_fix(&document, &diagnostics[0], "AutoInjectProvideFix_AddCallTo_Setup");
    insta::assert_snapshot!(print_type(&first_type(&fixed)), @r#"
    [Meta(typeof(IAutoNode))]
    public partial class Foo : Node, IProvide<int>
    {
        public override void _Notification(int what) => this.Notify(what);

        public void Setup()
        {
            this.Provide();
        }
    }
    "#);
    assert!(analyze(&fixed).is_empty());
}

#[test]
fn every_provide_fix_clears_the_diagnostic() {
    let class = provider("Foo", 0).with_member(forwarding("what", 60));
    let document = document(vec![class]);
    let diagnostics = analyze(&document);
    assert_eq!(ids(&diagnostics), ["AUTO_INJECT_002"]);
    for key in [
        "AutoInjectProvideFix_CreateNew_Setup",
        "AutoInjectProvideFix_CreateNew_OnReady",
        "AutoInjectProvideFix_CreateNew__Ready",
    ] {
        let fixed = apply_fix(&document, &diagnostics[0], key);
        assert!(analyze(&fixed).is_empty(), "{key} left diagnostics behind");
    }
}

#[test]
fn provider_split_across_partial_parts_is_reported_at_the_attribute() {
    let attributed = auto_node("Game", 0).with_member(forwarding("what", 60));
    let provides = TypeDeclaration::class("Game")
        .with_modifiers([Modifier::Public, Modifier::Partial])
        .with_base(TypeSyntax::generic("IProvide", vec![int()]))
        .with_span(Span::new(500, 600));
    let document = document(vec![attributed, provides]);
    let diagnostics = analyze(&document);
    assert_eq!(ids(&diagnostics), ["AUTO_INJECT_002"]);
    assert_eq!(diagnostics[0].span, Span::new(1, 24));
    assert_eq!(diagnostics[0].class_name, "Game");

    let fixed = apply_fix(&document, &diagnostics[0], "AutoInjectProvideFix_CreateNew_Setup");
    assert!(analyze(&fixed).is_empty());
}

#[test]
fn notify_fix_forwards_the_actual_parameter_name() {
    let hook = notification("signal", MethodBody::Block(Block::new(vec![])), 60);
    let document = document(vec![auto_node("Player", 0).with_member(hook)]);
    let diagnostics = analyze(&document);
    assert_eq!(ids(&diagnostics), ["AUTO_INJECT_003"]);
    assert_eq!(diagnostics[0].span, Span::new(81, 94));

    let fixed = apply_fix(&document, &diagnostics[0], "AutoInjectNotifyMissingFix");
    insta::assert_snapshot!(print_type(&first_type(&fixed)), @r#"
    [Meta(typeof(IAutoNode))]
    public partial class Player : Node
    {
        public override void _Notification(int signal)
        {
            this.Notify(signal);
        }
    }
    "#);
    assert!(analyze(&fixed).is_empty());
}

#[test]
fn converting_expression_body_keeps_comment_on_original_statement() {
    let mut arrow = ArrowBody::new(this_call("Log", vec![identifier("what")]));
    arrow.terminator = Terminator::synthetic().with_trailing_trivia(vec![
        Trivia::Whitespace(" ".into()),
        Trivia::LineComment(" keep me".into()),
    ]);
    let hook = notification("what", MethodBody::Expression(arrow), 60);
    let document = document(vec![auto_node("Player", 0).with_member(hook)]);
    let diagnostics = analyze(&document);
    assert_eq!(ids(&diagnostics), ["AUTO_INJECT_003"]);

    let fixed = apply_fix(&document, &diagnostics[0], "AutoInjectNotifyMissingFix");
    let printed = print_type(&first_type(&fixed));
    assert_eq!(printed.matches("// keep me").count(), 1, "{printed}");
    insta::assert_snapshot!(printed, @r#"
    [Meta(typeof(IAutoNode))]
    public partial class Player : Node
    {
        public override void _Notification(int what)
        {
            this.Log(what); // keep me
            this.Notify(what);
        }
    }
    "#);
}

#[test]
fn fixed_document_prints_as_a_whole_file() {
    let mut unit = CompilationUnit::new(vec![auto_node("Player", 0)], Span::new(0, 400));
    unit.usings = vec!["Godot".into(), "Chickensoft.AutoInject".into()];
    unit.namespace = Some("Game".into());
    let document = Document::new("Player.cs", unit);
    let diagnostics = analyze(&document);
    let fixed = apply_fix(&document, &diagnostics[0], "AutoInjectNotificationOverrideFix");
    let root = fixed
        .syntax_root(&CancellationToken::new())
        .expect("not cancelled")
        .expect("has root");
    insta::assert_snapshot!(print_unit(&root).trim_end(), @r#"
    using Godot;
    using Chickensoft.AutoInject;

    namespace Game;

    [Meta(typeof(IAutoNode))]
    public partial class Player : Node
    {
        public override void _Notification(int what) => this.Notify(what);
    }
    "#);
}
