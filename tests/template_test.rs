use std::cell::Cell;
use std::rc::Rc;

use stencil::context::Context;
use stencil::error::Error;
use stencil::renderer::{ParseResult, TemplateEngine, TemplateRenderer};
use stencil::token::tokenize;

fn context(pairs: &[(&str, &str)]) -> Context {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_variable_substitution() {
    let engine = TemplateEngine::new();
    let ctx = context(&[("name", "my-app"), ("id", "org.example.MyApp")]);

    let result = engine.render("{{name}} ({{id}})\n", &ctx).unwrap();
    assert_eq!(result, "my-app (org.example.MyApp)\n");
}

#[test]
fn test_missing_variable_renders_empty() {
    let engine = TemplateEngine::new();
    assert_eq!(engine.render("{{missing}}", &Context::new()).unwrap(), "");
    assert_eq!(engine.render("a{{missing}}b", &Context::new()).unwrap(), "ab");
}

#[test]
fn test_escaped_braces_roundtrip() {
    let engine = TemplateEngine::with_default_logic();
    let ctx = context(&[("x", "value")]);

    assert_eq!(engine.render("{{{{x}}}}", &ctx).unwrap(), "{{x}}");
    assert_eq!(engine.render("{{{{x}}}}", &Context::new()).unwrap(), "{{x}}");
    assert_eq!(
        engine.render("{{{{#ifdef x}}}}{{{{/}}}}", &ctx).unwrap(),
        "{{#ifdef x}}{{/}}"
    );
}

#[test]
fn test_escaped_named_close_is_literal() {
    let engine = TemplateEngine::new();
    assert_eq!(
        engine.render("{{{{/foo}}}}", &Context::new()).unwrap(),
        "{{/foo}}"
    );
}

#[test]
fn test_nested_blocks() {
    let engine = TemplateEngine::with_default_logic();
    let template = "{{#ifdef a}}Y{{#ifdef b}}Z{{/}}{{/}}";

    assert_eq!(engine.render(template, &context(&[("a", "1")])).unwrap(), "Y");
    assert_eq!(
        engine
            .render(template, &context(&[("a", "1"), ("b", "1")]))
            .unwrap(),
        "YZ"
    );
    assert_eq!(engine.render(template, &context(&[("b", "1")])).unwrap(), "");
}

#[test]
fn test_content_after_discarded_block_is_rendered() {
    let engine = TemplateEngine::with_default_logic();
    let result = engine
        .render("{{#ifdef a}}{{#ifdef b}}x{{/}}y{{/}}tail {{c}}", &context(&[("c", "C")]))
        .unwrap();
    assert_eq!(result, "tail C");
}

#[test]
fn test_ifdef_ifundef_are_exclusive() {
    let engine = TemplateEngine::with_default_logic();
    let template = "{{#ifdef k}}A{{/}}{{#ifundef k}}B{{/}}";

    assert_eq!(engine.render(template, &context(&[("k", "v")])).unwrap(), "A");
    assert_eq!(engine.render(template, &Context::new()).unwrap(), "B");
}

#[test]
fn test_ifdef_matches_empty_value() {
    let engine = TemplateEngine::with_default_logic();
    let result = engine
        .render("{{#ifdef k}}defined{{/}}", &context(&[("k", "")]))
        .unwrap();
    assert_eq!(result, "defined");
}

#[test]
fn test_unregistered_logic_fails() {
    let engine = TemplateEngine::new();
    let err = engine.render("{{#nope k}}x{{/}}", &Context::new()).unwrap_err();
    assert!(matches!(err, Error::UnregisteredLogic { ref name } if name == "nope"));
}

#[test]
fn test_unregistered_logic_inside_discarded_block_fails() {
    let engine = TemplateEngine::with_default_logic();
    let err = engine
        .render("{{#ifdef a}}{{#nope k}}x{{/}}{{/}}", &Context::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnregisteredLogic { .. }));
}

#[test]
fn test_named_close_tag_fails() {
    let engine = TemplateEngine::with_default_logic();
    let err = engine.render("{{/foo}}", &Context::new()).unwrap_err();
    assert!(matches!(err, Error::SyntaxError { ref tag } if tag == "{{/foo}}"));

    let err = engine
        .render("{{#ifdef a}}x{{/ifdef}}", &Context::new())
        .unwrap_err();
    assert!(matches!(err, Error::SyntaxError { .. }));
}

#[test]
fn test_unterminated_block_runs_to_end() {
    let engine = TemplateEngine::with_default_logic();
    assert_eq!(
        engine
            .render("a{{#ifdef k}}b {{k}}", &context(&[("k", "v")]))
            .unwrap(),
        "ab v"
    );
    assert_eq!(engine.render("a{{#ifdef k}}b", &Context::new()).unwrap(), "a");
}

#[test]
fn test_stray_close_tag_stops_rendering() {
    let engine = TemplateEngine::new();
    assert_eq!(engine.render("a{{/}}b", &Context::new()).unwrap(), "a");
    assert_eq!(engine.render("a{{/}}", &Context::new()).unwrap(), "a");
}

#[test]
fn test_parse_reports_top_level_close() {
    let engine = TemplateEngine::with_default_logic();

    let tokens = tokenize("a{{/}}");
    let parsed = engine.parse(&tokens, &Context::new(), 0).unwrap();
    assert_eq!(
        parsed,
        ParseResult {
            output: "a".to_string(),
            next_index: 2,
            closed: true,
        }
    );

    let tokens = tokenize("a{{/}}b");
    let parsed = engine.parse(&tokens, &Context::new(), 0).unwrap();
    assert!(parsed.closed);
    assert_eq!(parsed.next_index, 2);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_parse_block_closed_at_end_is_not_stray() {
    let engine = TemplateEngine::with_default_logic();
    let tokens = tokenize("{{#ifdef k}}x{{/}}");

    let parsed = engine.parse(&tokens, &Context::new(), 0).unwrap();
    assert!(!parsed.closed);
    assert_eq!(parsed.next_index, tokens.len());

    let inner = engine.parse(&tokens, &Context::new(), 1).unwrap();
    assert!(inner.closed);
    assert_eq!(inner.output, "x");
}

#[test]
fn test_malformed_delimiters_are_text() {
    let engine = TemplateEngine::new();
    let ctx = context(&[("name", "x")]);
    assert_eq!(
        engine.render("{{ name }} {{na-me}} {name}", &ctx).unwrap(),
        "{{ name }} {{na-me}} {name}"
    );
}

#[test]
fn test_predicate_receives_key_and_context() {
    let mut engine = TemplateEngine::new();
    engine.register_logic("ifeq_yes", |key: &str, ctx: &Context| {
        ctx.get(key).map(|v| v == "yes").unwrap_or(false)
    });

    let template = "{{#ifeq_yes lint}}eslint{{/}}";
    assert_eq!(
        engine.render(template, &context(&[("lint", "yes")])).unwrap(),
        "eslint"
    );
    assert_eq!(
        engine.render(template, &context(&[("lint", "no")])).unwrap(),
        ""
    );
}

#[test]
fn test_predicate_evaluated_once_per_block() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let mut engine = TemplateEngine::new();
    engine.register_logic("count", move |_: &str, _: &Context| {
        counter.set(counter.get() + 1);
        false
    });

    let result = engine
        .render("{{#count a}}x{{/}}{{#count b}}y{{/}}", &Context::new())
        .unwrap();
    assert_eq!(result, "");
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_register_logic_overwrites() {
    let mut engine = TemplateEngine::new();
    engine.register_logic("flag", |_: &str, _: &Context| false);
    engine.register_logic("flag", |_: &str, _: &Context| true);

    assert_eq!(
        engine.render("{{#flag x}}on{{/}}", &Context::new()).unwrap(),
        "on"
    );
}

#[test]
fn test_multiline_template() {
    let engine = TemplateEngine::with_default_logic();
    let template = "[app]\nname={{name}}\n{{#ifdef repo}}\nrepo={{repo}}\n{{/}}end\n";

    assert_eq!(
        engine
            .render(template, &context(&[("name", "demo"), ("repo", "https://example.org/demo")]))
            .unwrap(),
        "[app]\nname=demo\n\nrepo=https://example.org/demo\nend\n"
    );
    assert_eq!(
        engine.render(template, &context(&[("name", "demo")])).unwrap(),
        "[app]\nname=demo\nend\n"
    );
}

#[test]
fn test_default_logic_registered() {
    let engine = TemplateEngine::with_default_logic();
    assert!(engine.logic().contains("ifdef"));
    assert!(engine.logic().contains("ifundef"));
    assert!(!TemplateEngine::new().logic().contains("ifdef"));
}
