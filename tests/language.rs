//! End-to-end pipeline scenarios: source text through lexer, parser, and
//! evaluator, checked against the user-visible `inspect` surface.

use indoc::indoc;

use lume::interpreter::{self, env::Environment, value::Value};
use lume::parser;

fn run(input: &str) -> Option<Value> {
    let (program, errors) = parser::parse(input);
    assert!(errors.is_empty(), "parser errors for {input:?}: {errors:?}");
    let env = Environment::new();
    interpreter::eval_program(&program, &env)
}

fn run_inspect(input: &str) -> String {
    run(input)
        .unwrap_or_else(|| panic!("no value produced for {input:?}"))
        .inspect()
}

#[test]
fn arithmetic_with_precedence() {
    assert_eq!(run_inspect("5 + 5 * 2"), "15");
    let (program, errors) = parser::parse("5 + 5 * 2");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "(5 + (5 * 2))");
}

#[test]
fn unbound_identifiers_parse_but_fail_at_runtime() {
    let (program, errors) = parser::parse("-a * b");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "((-a) * b)");

    assert_eq!(run_inspect("-a * b"), "ERROR: identifier not found: a");
}

#[test]
fn nested_return_unwraps_once_at_the_top_level() {
    let input = indoc! {"
        if (10 > 1) {
            if (10 > 1) {
                return 10;
            }
            return 1;
        }
    "};
    assert_eq!(run_inspect(input), "10");
}

#[test]
fn let_bindings_feed_later_statements() {
    let input = "let a = 5; let b = a > 3; let c = a * 99; if (b) { 10 } else { 1 };";
    assert_eq!(run_inspect(input), "10");
}

#[test]
fn string_concatenation_is_not_supported() {
    assert_eq!(
        run_inspect(r#""Hello" + " World""#),
        "ERROR: unknown operator: STRING + STRING"
    );
}

#[test]
fn recursive_closure_counts_past_one_hundred() {
    let input = indoc! {"
        let counter = fn(x) {
            if (x > 100) {
                return true;
            } else {
                counter(x + 1);
            }
        };
        counter(0)
    "};
    assert_eq!(run_inspect(input), "true");
}

#[test]
fn closures_keep_their_defining_environment_alive() {
    let input = indoc! {"
        let newAdder = fn(x) { fn(y) { x + y } };
        let addTwo = newAdder(2);
        addTwo(3)
    "};
    assert_eq!(run_inspect(input), "5");
}

#[test]
fn higher_order_functions_over_arrays() {
    let input = indoc! {"
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) {
                    result
                } else {
                    iter(rest(arr), f(result, first(arr)));
                }
            };
            iter(arr, initial);
        };
        let sum = fn(arr) {
            reduce(arr, 0, fn(initial, el) { initial + el });
        };
        sum([1, 2, 3, 4, 5])
    "};
    assert_eq!(run_inspect(input), "15");
}

#[test]
fn array_indexing_returns_null_out_of_range() {
    assert_eq!(run_inspect("[1, 2, 3][1]"), "2");
    assert_eq!(run_inspect("[1, 2, 3][3]"), "null");
    assert_eq!(run_inspect("[1, 2, 3][-1]"), "null");
}

#[test]
fn value_less_programs_produce_no_output() {
    assert!(run("let a = 5;").is_none());
}

#[test]
fn parser_errors_are_collected_not_thrown() {
    let (_, errors) = parser::parse("let = 5;");
    let messages = errors.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert!(messages.contains(&"expected next token to be IDENT, got = instead".to_string()));
}

#[test]
fn function_values_render_their_source_shape() {
    assert_eq!(
        run_inspect("fn(x, y) { x + y; }"),
        "fn(x, y) {\n(x + y)\n}"
    );
}
