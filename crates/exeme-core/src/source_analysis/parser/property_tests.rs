// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the Exeme parser.
//!
//! These tests use `proptest` to verify parser invariants over generated inputs:
//!
//! 1. **Parser never panics**: arbitrary input yields a module or an error
//! 2. **Valid programs parse**: composed valid statements always succeed
//! 3. **Error spans lie inside the input**
//! 4. **Comma discipline**: a leading or doubled comma in a parameter list
//!    is an "unexpected comma" error
//! 5. **Function headers round-trip** their name, parameters and return type

use proptest::prelude::*;

use crate::ast::Node;
use crate::source_analysis::{ErrorCode, parse};

// ============================================================================
// Generators
// ============================================================================

/// Statements that parse on their own line.
const VALID_STATEMENTS: &[&str] = &[
    "x = 1",
    "y **= 2 + x",
    "*p = q",
    "f(a, b[1])",
    "result = (a + b) * c",
    "flags = flags | 1 << 4",
    "done = !ready && count >= 10",
    "node = node->next",
    "return",
    "return x // 2",
    "pass",
    "break",
    "{",
    "}",
    "fn main() {",
    "fn add(a: int, b: int) -> int {",
    "# just a comment",
];

const IDENTIFIERS: &[&str] = &["a", "b", "count", "value", "_tmp", "x1"];

fn valid_statement() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_STATEMENTS).prop_map(std::string::ToString::to_string)
}

fn valid_program() -> impl Strategy<Value = String> {
    prop::collection::vec(valid_statement(), 0..12).prop_map(|lines| lines.join("\n"))
}

/// Generates a truncated valid program (cut at a character boundary).
fn truncated_program() -> impl Strategy<Value = String> {
    valid_program().prop_flat_map(|s| {
        let len = s.chars().count();
        (0..=len).prop_map(move |cut| s.chars().take(cut).collect::<String>())
    })
}

fn identifier() -> impl Strategy<Value = &'static str> {
    prop::sample::select(IDENTIFIERS)
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: Parser never panics on arbitrary input.
    #[test]
    fn parser_never_panics(input in "\\PC{0,300}") {
        let _result = parse(&input);
    }

    /// Property 1b: Parser never panics on truncated programs.
    #[test]
    fn parser_never_panics_on_truncation(input in truncated_program()) {
        let _result = parse(&input);
    }

    /// Property 2: Composed valid statements always parse, one node per line.
    #[test]
    fn valid_programs_parse(input in valid_program()) {
        let module = parse(&input);
        prop_assert!(module.is_ok(), "{:?} failed: {:?}", input, module);
        let expected = input
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .count();
        prop_assert_eq!(module.unwrap().nodes.len(), expected);
    }

    /// Property 3: Error spans lie inside the input.
    #[test]
    fn error_spans_within_input(input in truncated_program()) {
        if let Err(error) = parse(&input) {
            if let Some(span) = error.span() {
                let lines: Vec<&str> = input.lines().collect();
                prop_assert!(span.line() as usize <= lines.len(), "{:?}", error);
                let width = lines[span.line() as usize - 1].chars().count();
                prop_assert!((span.start() as usize) < width, "{:?} in {:?}", error, input);
            }
        }
    }

    /// Property 4: Two consecutive commas are an unexpected comma.
    #[test]
    fn doubled_comma_rejected(
        before in prop::collection::vec(identifier(), 1..4),
        after in prop::collection::vec(identifier(), 0..3),
    ) {
        let mut params = before.join(", ");
        params.push_str(",,");
        params.push_str(&after.join(", "));
        let err = parse(&format!("fn f({params}) {{")).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::P0003);
        prop_assert_eq!(err.to_string(), "unexpected comma");
    }

    /// Property 4b: A leading comma is an unexpected comma.
    #[test]
    fn leading_comma_rejected(params in prop::collection::vec(identifier(), 0..4)) {
        let source = format!("fn f(, {}) {{", params.join(", "));
        let err = parse(&source).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::P0003);
    }

    /// Property 5: Function headers keep their parts.
    #[test]
    fn function_header_round_trip(
        name in identifier(),
        params in prop::collection::vec((identifier(), prop::option::of(identifier())), 0..5),
        return_type in prop::option::of(identifier()),
    ) {
        let rendered: Vec<String> = params
            .iter()
            .map(|(param, ty)| match ty {
                Some(ty) => format!("{param}: {ty}"),
                None => (*param).to_string(),
            })
            .collect();
        let arrow = return_type.map(|ty| format!(" -> {ty}")).unwrap_or_default();
        let source = format!("fn {name}({}){arrow} {{", rendered.join(", "));

        let module = parse(&source).unwrap();
        prop_assert_eq!(module.nodes.len(), 1);
        let Node::FunctionDefinition(function) = &module.nodes[0] else {
            return Err(TestCaseError::fail("expected a function definition"));
        };
        prop_assert_eq!(function.name(), name);
        prop_assert_eq!(function.return_type_name(), return_type);
        prop_assert_eq!(function.parameters.len(), params.len());
        for (parameter, (param, ty)) in function.parameters.iter().zip(&params) {
            prop_assert_eq!(parameter.name(), *param);
            prop_assert_eq!(parameter.type_name(), *ty);
        }
    }

    /// Property 6: A function header cut short is unterminated.
    #[test]
    fn truncated_header_is_unterminated(
        cut in (2usize..26).prop_filter("cut inside '->'", |cut| *cut != 19),
    ) {
        let source = "fn add(a: int, b) -> int {";
        let truncated: String = source.chars().take(cut).collect();
        let err = parse(&truncated).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::P0002);
        prop_assert_eq!(err.span(), None);
    }
}
