use crate::generator::GeneratorConfig;
use crate::validation::{InvariantViolation, Lexeme, is_operator_symbol, lex, validate_expression};

fn check(expr: &str) -> Result<(), InvariantViolation> {
    validate_expression(expr, &GeneratorConfig::default()).map(|_| ())
}

#[test]
fn test_lex_signed_arguments() {
    let lexemes = lex("max(3,-5)").map(|l| l.into_iter().map(|(_, x)| x).collect::<Vec<_>>());
    assert_eq!(
        lexemes,
        Ok(vec![
            Lexeme::Ident("max".to_string()),
            Lexeme::OpenParen,
            Lexeme::Number(3),
            Lexeme::Comma,
            Lexeme::Operator('-'),
            Lexeme::Number(5),
            Lexeme::CloseParen,
        ])
    );
}

#[test]
fn test_lex_rejects_huge_literal() {
    let result = lex("1+99999999999999999999");
    assert_eq!(result, Err(InvariantViolation::NumberOutOfRange { offset: 2 }));
}

#[test]
fn test_lex_rejects_decimal_point() {
    assert_eq!(
        lex("3.5"),
        Err(InvariantViolation::UnexpectedCharacter { ch: '.', offset: 1 })
    );
    assert!(matches!(
        check("3.5"),
        Err(InvariantViolation::UnexpectedCharacter { ch: '.', .. })
    ));
}

#[test]
fn test_operator_symbols() {
    for op in ['+', '-', '*', '/', '^', '%'] {
        assert!(is_operator_symbol(op), "{}", op);
    }
    for ch in ['_', '.', '(', ')', ',', ' ', 'x', '7', 'é', '\n'] {
        assert!(!is_operator_symbol(ch), "{:?}", ch);
    }
}

#[test]
fn test_valid_expressions() {
    assert!(check("5").is_ok());
    assert!(check("1+2*3").is_ok());
    assert!(check("(4-2)/(7+abs(3))").is_ok());
    assert!(check("max(3,-100,42)*sqrt(9)").is_ok());
    assert!(check("((1+2)").is_err());
}

#[test]
fn test_shape_counts() {
    let shape = validate_expression("(1+(2*min(3,4)))-5", &GeneratorConfig::default());
    assert!(shape.is_ok());
    if let Ok(shape) = shape {
        assert_eq!(shape.operands, 3);
        assert_eq!(shape.operators, 3);
        assert_eq!(shape.calls, 1);
        assert_eq!(shape.open_parens, 2);
        assert_eq!(shape.close_parens, 2);
        assert_eq!(shape.max_depth, 2);
    }
}

#[test]
fn test_unbalanced_parens() {
    assert_eq!(
        check("(1+(2"),
        Err(InvariantViolation::Unbalanced { open: 2, close: 0 })
    );
    assert_eq!(
        check("1)+(2"),
        Err(InvariantViolation::UnmatchedCloseParen { offset: 1 })
    );
}

#[test]
fn test_operator_placement() {
    assert_eq!(
        check("(+1)"),
        Err(InvariantViolation::OperatorAfterOpenParen { op: '+', offset: 1 })
    );
    assert_eq!(
        check("1+*2"),
        Err(InvariantViolation::AdjacentOperators { op: '*', offset: 2 })
    );
    assert_eq!(
        check("-1"),
        Err(InvariantViolation::LeadingOperator { op: '-' })
    );
    assert_eq!(check("1+"), Err(InvariantViolation::TrailingOperator));
    assert_eq!(
        check("(1+)"),
        Err(InvariantViolation::OperatorBeforeCloseParen { offset: 3 })
    );
    assert_eq!(check("1^2"), Err(InvariantViolation::UnknownOperator { op: '^', offset: 1 }));
}

#[test]
fn test_missing_operator_and_empty_group() {
    assert_eq!(check("1 2"), Err(InvariantViolation::MissingOperator { offset: 2 }));
    assert_eq!(check("2(3)"), Err(InvariantViolation::MissingOperator { offset: 1 }));
    assert_eq!(check("1+()"), Err(InvariantViolation::EmptyGroup { offset: 3 }));
}

#[test]
fn test_malformed_calls() {
    assert!(matches!(
        check("abs()"),
        Err(InvariantViolation::EmptyArgumentList { .. })
    ));
    assert!(matches!(
        check("max(1,2"),
        Err(InvariantViolation::UnclosedCall { .. })
    ));
    assert!(matches!(
        check("max(1,)"),
        Err(InvariantViolation::MalformedArgument { .. })
    ));
    assert!(matches!(
        check("sqrt 4"),
        Err(InvariantViolation::CallMissingOpenParen { .. })
    ));
    assert!(matches!(
        check("cos(1)"),
        Err(InvariantViolation::UnknownFunction { .. })
    ));
    assert!(matches!(check("1,2"), Err(InvariantViolation::StrayComma { .. })));
}

#[test]
fn test_call_arity() {
    assert!(matches!(
        check("abs(1,2)"),
        Err(InvariantViolation::ArityMismatch { count: 2, max: 1, .. })
    ));

    let sixteen = (1..=16).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
    assert!(matches!(
        check(&format!("max({})", sixteen)),
        Err(InvariantViolation::ArityMismatch { count: 16, max: 15, .. })
    ));

    assert!(matches!(
        check("max(3)"),
        Err(InvariantViolation::ArityMismatch { count: 1, min: 2, max: 15, .. })
    ));
    let single = GeneratorConfig {
        max_extra_arguments: 0,
        ..GeneratorConfig::default()
    };
    assert!(validate_expression("max(3)", &single).is_ok());
    assert!(validate_expression("max(3,4)", &single).is_err());

    let fifteen = (1..=15).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
    assert!(check(&format!("max({})", fifteen)).is_ok());
}

#[test]
fn test_empty_expression() {
    assert_eq!(check(""), Err(InvariantViolation::Empty));
    assert_eq!(check("   "), Err(InvariantViolation::Empty));
}
