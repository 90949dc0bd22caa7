//! Tests for free-form expression parsing and evaluation.


use std::f64::consts::{E, PI};

use concavity::equation::parse_expression;
use concavity::{EvaluationError, Expression, FunctionSelection};
use test_utils::assert_float_eq;

fn eval(text: &str, x: f64) -> f64 {
    let expr = parse_expression(text)
        .unwrap_or_else(|e| panic!("failed to parse '{}': {}", text, e));
    expr.resolve()
        .unwrap_or_else(|e| panic!("failed to resolve '{}': {}", text, e));
    expr.evaluate_at(x).unwrap()
}

#[test]
fn test_catalog_sources_parse() {
    let cases = vec![
        ("x^3 - 3*x", 2.0, 2.0),
        ("x**4 - 4*x**2", 2.0, 0.0),
        ("x^5 - 5*x", 1.0, -4.0),
        ("np.sin(x)", PI / 2.0, 1.0),
    ];

    for (text, x, expected) in cases {
        assert_float_eq(eval(text, x), expected, 1e-12);
    }
}

#[test]
fn test_operator_precedence() {
    let cases = vec![
        ("1 + 2 * 3", 0.0, 7.0),
        ("(1 + 2) * 3", 0.0, 9.0),
        ("8 / 4 / 2", 0.0, 1.0),
        ("10 - 4 - 3", 0.0, 3.0),
        ("2^3^2", 0.0, 512.0),
        ("-x^2", 3.0, -9.0),
        ("(-x)^2", 3.0, 9.0),
        ("x^-1", 4.0, 0.25),
        ("2 * -x", 1.5, -3.0),
        ("+x", 1.5, 1.5),
    ];

    for (text, x, expected) in cases {
        assert_float_eq(eval(text, x), expected, 1e-12);
    }
}

#[test]
fn test_whitelisted_functions() {
    let cases = vec![
        ("sin(x)", 0.0, 0.0),
        ("cos(x)", 0.0, 1.0),
        ("tan(x)", PI / 4.0, 1.0),
        ("exp(x)", 1.0, E),
        ("ln(x)", E, 1.0),
        ("log(x)", E * E, 2.0),
        ("sqrt(x)", 9.0, 3.0),
        ("abs(x)", -2.5, 2.5),
        ("numpy.cos(2 * x)", PI, 1.0),
        ("SIN(x)", PI / 2.0, 1.0),
    ];

    for (text, x, expected) in cases {
        assert_float_eq(eval(text, x), expected, 1e-12);
    }
}

#[test]
fn test_named_constants() {
    assert_float_eq(eval("pi", 0.0), PI, 1e-15);
    assert_float_eq(eval("np.pi * x", 2.0), 2.0 * PI, 1e-15);
    assert_float_eq(eval("e^x", 1.0), E, 1e-15);
    assert_float_eq(eval("1.5e2 + x", 0.0), 150.0, 1e-12);
}

#[test]
fn test_undefined_names() {
    let cases = vec![("x + t", "t"), ("y", "y"), ("math.pi", "math.pi"), ("np.x", "np.x")];

    for (text, name) in cases {
        let expr = parse_expression(text).unwrap();
        assert_eq!(
            expr.resolve(),
            Err(EvaluationError::UndefinedName(name.to_string())),
            "{}",
            text
        );
    }
}

#[test]
fn test_unsupported_calls() {
    let expr = parse_expression("sinh(x)").unwrap();
    assert_eq!(
        expr.resolve(),
        Err(EvaluationError::UnknownFunction("sinh".to_string()))
    );

    let expr = parse_expression("os.system(x)").unwrap();
    assert!(matches!(
        expr.resolve(),
        Err(EvaluationError::UnknownFunction(_))
    ));

    let expr = parse_expression("sin(x, x)").unwrap();
    assert_eq!(
        expr.resolve(),
        Err(EvaluationError::Arity {
            name: "sin".to_string(),
            expected: 1,
            found: 2
        })
    );
}

#[test]
fn test_syntax_errors() {
    let cases = vec!["", "x +", "2x", "(x", "x + )", "x $ 2", "__import__('os')"];

    for text in cases {
        assert!(
            matches!(
                parse_expression(text),
                Err(EvaluationError::Syntax { .. })
            ),
            "expected a syntax error for '{}'",
            text
        );
    }
}

#[test]
fn test_display_reparses_to_same_value() {
    let cases = vec!["x^3 - 3*x", "-x^2 + sin(x) / 2", "np.exp(-(x - 1)^2)"];

    for text in cases {
        let expr: Expression = text.parse().unwrap();
        let reparsed: Expression = expr.to_string().parse().unwrap();
        for x in [-1.5, 0.0, 0.75, 2.0] {
            assert_float_eq(
                reparsed.evaluate_at(x).unwrap(),
                expr.evaluate_at(x).unwrap(),
                1e-12,
            );
        }
    }
}

#[test]
fn test_selection_from_json() {
    let selection: FunctionSelection =
        serde_json::from_str(r#"{"expression": "x^2 - 1"}"#).unwrap();
    assert!(matches!(selection, FunctionSelection::Expression(_)));

    let result: Result<FunctionSelection, _> = serde_json::from_str(r#"{"expression": "x +"}"#);
    assert!(result.is_err());
}

#[test]
fn test_deeply_nested_input_is_an_error() {
    let text = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
    assert!(matches!(
        FunctionSelection::parse(&text),
        Err(EvaluationError::TooDeep { .. })
    ));

    let json = format!(r#"{{"expression": "{}x"}}"#, "-".repeat(1000));
    let result: Result<FunctionSelection, _> = serde_json::from_str(&json);
    assert!(result.is_err());

    let text = format!("{}x{}", "sin(".repeat(20), ")".repeat(20));
    assert_float_eq(eval(&text, 0.0), 0.0, 1e-15);
}
