use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generator::{
    CategoryWeights, ExpressionGenerator, GenerationState, GeneratorConfig, GeneratorError,
    IntRange, SlotDraw, Token, TokenKind, balance, generate_batch, round_rng, step,
};
use crate::validation::validate_expression;

fn generate_with(config: &GeneratorConfig, length: usize, seed: u64) -> Vec<Token> {
    let mut rng = StdRng::seed_from_u64(seed);
    let generated = ExpressionGenerator::new(&mut rng, config).and_then(|mut g| g.generate(length));
    assert!(generated.is_ok(), "seed {}: {:?}", seed, generated);
    generated.map(|e| e.tokens().to_vec()).unwrap_or_default()
}

fn operands_only(operators: Vec<char>) -> GeneratorConfig {
    GeneratorConfig {
        operators,
        weights: CategoryWeights {
            function: 0,
            paren: 0,
            operand: 1,
        },
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_plus_only_without_functions_or_parens() {
    let config = operands_only(vec!['+']);
    let tokens = generate_with(&config, 10, 7);

    assert_eq!(tokens.len(), 9);
    for (i, token) in tokens.iter().enumerate() {
        if i % 2 == 0 {
            match token {
                Token::Operand(n) => assert!(config.operand_range.contains(*n)),
                other => panic!("expected operand at {}, got {:?}", i, other),
            }
        } else {
            assert_eq!(token, &Token::Operator('+'));
        }
    }

    let rendered: String = tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(rendered.matches('+').count(), 4);
}

#[test]
fn test_close_on_balanced_state_opens_instead() {
    let state = GenerationState::new();
    let (state, emitted) = step(
        state,
        SlotDraw::Paren {
            close: true,
            operand: 12,
        },
    );

    assert_eq!(emitted, vec![Token::OpenParen, Token::Operand(12)]);
    assert_eq!(state.open_count(), 1);
    assert_eq!(state.close_count(), 0);
}

#[test]
fn test_close_after_operator_inserts_operand() {
    let mut state = GenerationState::new();
    for draw in [
        SlotDraw::Paren {
            close: false,
            operand: 3,
        },
        SlotDraw::Operator('*'),
    ] {
        (state, _) = step(state, draw);
    }

    let (state, emitted) = step(
        state,
        SlotDraw::Paren {
            close: true,
            operand: 8,
        },
    );
    assert_eq!(emitted, vec![Token::Operand(8), Token::CloseParen]);
    assert_eq!(state.open_count(), state.close_count());
    assert_eq!(state.position(), 3);
}

#[test]
fn test_close_after_operand_emits_only_close_paren() {
    let mut state = GenerationState::new();
    (state, _) = step(
        state,
        SlotDraw::Paren {
            close: false,
            operand: 3,
        },
    );
    assert_eq!(state.last_kind(), Some(TokenKind::Operand));

    let (state, emitted) = step(
        state,
        SlotDraw::Paren {
            close: true,
            operand: 8,
        },
    );
    assert_eq!(emitted, vec![Token::CloseParen]);
    assert!(!state.can_close());
}

#[test]
fn test_forced_max_call_with_three_extra_arguments() {
    let (_, emitted) = step(
        GenerationState::new(),
        SlotDraw::Call {
            name: "max".to_string(),
            first: 3,
            extra: vec![-5, 10, 42],
        },
    );

    assert_eq!(emitted.len(), 1);
    if let Some(Token::Call { name, args }) = emitted.first() {
        assert_eq!(name, "max");
        assert_eq!(args.len(), 4);
    }
    let rendered = emitted.iter().map(|t| t.to_string()).collect::<String>();
    assert_eq!(rendered, "max(3,-5,10,42)");
}

#[test]
fn test_balance_closes_every_open_paren() {
    let mut state = GenerationState::new();
    for _ in 0..3 {
        (state, _) = step(
            state,
            SlotDraw::Paren {
                close: false,
                operand: 1,
            },
        );
        (state, _) = step(state, SlotDraw::Operator('-'));
    }
    (state, _) = step(state, SlotDraw::Operand(2));

    let (state, closing) = balance(state);
    assert_eq!(closing, vec![Token::CloseParen; 3]);
    assert_eq!(state.open_count(), 3);
    assert_eq!(state.close_count(), 3);
}

#[test]
fn test_generated_expressions_hold_structural_invariants() {
    let config = GeneratorConfig::default();
    for seed in 0..200 {
        let tokens = generate_with(&config, 200, seed);

        let opens = tokens.iter().filter(|t| **t == Token::OpenParen).count();
        let closes = tokens.iter().filter(|t| **t == Token::CloseParen).count();
        assert_eq!(opens, closes, "seed {}", seed);

        for pair in tokens.windows(2) {
            if let [a, b] = pair {
                assert!(
                    !(a.kind() == TokenKind::Operator && b.kind() == TokenKind::Operator),
                    "adjacent operators for seed {}",
                    seed
                );
                if a.kind() == TokenKind::OpenParen {
                    assert_eq!(b.kind(), TokenKind::Operand, "seed {}", seed);
                }
            }
        }

        for token in &tokens {
            if let Token::Call { name, args } = token {
                assert!(!args.is_empty());
                if config.is_variadic(name) {
                    assert!(args.len() >= 2 && args.len() <= config.max_arguments(name));
                } else {
                    assert_eq!(args.len(), 1);
                }
            }
        }

        let rendered: String = tokens.iter().map(|t| t.to_string()).collect();
        let shape = validate_expression(&rendered, &config);
        assert!(shape.is_ok(), "seed {}: {:?} in {}", seed, shape, rendered);
    }
}

#[test]
fn test_first_argument_keeps_narrow_range() {
    let config = GeneratorConfig {
        weights: CategoryWeights {
            function: 1,
            paren: 0,
            operand: 0,
        },
        ..GeneratorConfig::default()
    };
    let tokens = generate_with(&config, 100, 11);

    let calls: Vec<_> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Call { args, .. } => Some(args),
            _ => None,
        })
        .collect();
    assert_eq!(calls.len(), 50);
    for args in calls {
        if let Some((first, rest)) = args.split_first() {
            assert!(config.first_argument_range.contains(*first));
            assert!(rest.iter().all(|a| config.extra_argument_range.contains(*a)));
        }
    }
}

#[test]
fn test_zero_extra_arguments_yields_single_argument_calls() {
    let config = GeneratorConfig {
        functions: vec!["max".to_string(), "min".to_string()],
        max_extra_arguments: 0,
        weights: CategoryWeights {
            function: 1,
            paren: 0,
            operand: 0,
        },
        ..GeneratorConfig::default()
    };
    let tokens = generate_with(&config, 40, 5);

    for token in &tokens {
        if let Token::Call { args, .. } = token {
            assert_eq!(args.len(), 1);
        }
    }
}

#[test]
fn test_same_seed_same_expression() {
    let config = GeneratorConfig::default();
    let first = generate_with(&config, 500, 42);
    let second = generate_with(&config, 500, 42);
    assert_eq!(first, second);
}

#[test]
fn test_rounds_are_independent() {
    let config = GeneratorConfig::default();
    let batch = generate_batch(&config, 120, 99, 4);
    assert!(batch.is_ok());

    // Round 2 alone matches round 2 of the batch
    let mut rng = round_rng(99, 2);
    let alone = ExpressionGenerator::new(&mut rng, &config)
        .and_then(|mut g| g.generate(120))
        .map(|e| e.to_string());
    assert!(alone.is_ok());

    if let (Ok(batch), Ok(alone)) = (batch, alone) {
        assert_eq!(batch.len(), 4);
        assert_eq!(batch.get(2), Some(&alone));
    }
}

#[test]
fn test_odd_length_does_not_end_with_operator() {
    let config = operands_only(vec!['*']);
    let tokens = generate_with(&config, 11, 3);
    assert_eq!(tokens.len(), 9);
    assert_eq!(tokens.last().map(Token::kind), Some(TokenKind::Operand));
}

#[test]
fn test_length_too_short() {
    let config = GeneratorConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    let generator = ExpressionGenerator::new(&mut rng, &config);
    assert!(generator.is_ok());
    if let Ok(mut generator) = generator {
        assert_eq!(
            generator.generate(1),
            Err(GeneratorError::LengthTooShort { length: 1, min: 2 })
        );
        assert!(generator.generate(2).is_ok());
    }
}

#[test]
fn test_config_validation_errors() {
    let empty_ops = GeneratorConfig {
        operators: Vec::new(),
        ..GeneratorConfig::default()
    };
    assert_eq!(empty_ops.validate(), Err(GeneratorError::EmptyOperatorSet));

    let bad_op = GeneratorConfig {
        operators: vec!['+', 'x'],
        ..GeneratorConfig::default()
    };
    assert_eq!(bad_op.validate(), Err(GeneratorError::InvalidOperator('x')));

    // '_' would join the surrounding literals into an identifier
    let underscore = GeneratorConfig {
        operators: vec!['_'],
        ..GeneratorConfig::default()
    };
    assert_eq!(underscore.validate(), Err(GeneratorError::InvalidOperator('_')));

    // '.' would turn "3.5" into a decimal literal
    let dot = GeneratorConfig {
        operators: vec!['+', '.'],
        ..GeneratorConfig::default()
    };
    assert_eq!(dot.validate(), Err(GeneratorError::InvalidOperator('.')));

    let caret = GeneratorConfig {
        operators: vec!['^', '%'],
        ..GeneratorConfig::default()
    };
    assert!(caret.validate().is_ok());

    let zero = GeneratorConfig {
        weights: CategoryWeights {
            function: 0,
            paren: 0,
            operand: 0,
        },
        ..GeneratorConfig::default()
    };
    assert_eq!(zero.validate(), Err(GeneratorError::ZeroWeights));

    let overflow = GeneratorConfig {
        weights: CategoryWeights {
            function: u32::MAX,
            paren: 1,
            operand: 0,
        },
        ..GeneratorConfig::default()
    };
    assert_eq!(
        overflow.validate(),
        Err(GeneratorError::WeightsOverflow {
            total: u64::from(u32::MAX) + 1
        })
    );
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        ExpressionGenerator::new(&mut rng, &overflow),
        Err(GeneratorError::WeightsOverflow { .. })
    ));

    let at_limit = GeneratorConfig {
        weights: CategoryWeights {
            function: u32::MAX - 1,
            paren: 1,
            operand: 0,
        },
        ..GeneratorConfig::default()
    };
    assert!(at_limit.validate().is_ok());

    let inverted = GeneratorConfig {
        operand_range: IntRange::new(10, 1),
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(GeneratorError::InvalidRange { name: "operand", .. })
    ));

    let negative = GeneratorConfig {
        paren_operand_range: IntRange::new(-3, 3),
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        negative.validate(),
        Err(GeneratorError::NegativeRange { min: -3, .. })
    ));

    let unprintable = GeneratorConfig {
        extra_argument_range: IntRange::new(i64::MIN, 0),
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        unprintable.validate(),
        Err(GeneratorError::InvalidRange {
            name: "extra argument",
            ..
        })
    ));

    let no_functions = GeneratorConfig {
        functions: Vec::new(),
        variadic_functions: Vec::new(),
        ..GeneratorConfig::default()
    };
    assert_eq!(no_functions.validate(), Err(GeneratorError::EmptyFunctionSet));

    let stray_variadic = GeneratorConfig {
        variadic_functions: vec!["sum".to_string()],
        ..GeneratorConfig::default()
    };
    assert_eq!(
        stray_variadic.validate(),
        Err(GeneratorError::UnknownVariadicFunction("sum".to_string()))
    );

    let bad_name = GeneratorConfig {
        functions: vec!["2abs".to_string()],
        variadic_functions: Vec::new(),
        ..GeneratorConfig::default()
    };
    assert_eq!(
        bad_name.validate(),
        Err(GeneratorError::InvalidFunctionName("2abs".to_string()))
    );

    assert!(GeneratorConfig::default().validate().is_ok());
}

#[test]
fn test_draw_slot_resolves_every_choice() {
    let config = operands_only(vec!['/']);
    let mut rng = StdRng::seed_from_u64(4);
    let generator = ExpressionGenerator::new(&mut rng, &config);
    assert!(generator.is_ok());
    if let Ok(mut generator) = generator {
        assert_eq!(generator.draw_slot(2), Ok(SlotDraw::Operator('/')));
        let draw = generator.draw_slot(1);
        assert!(
            matches!(draw, Ok(SlotDraw::Operand(n)) if config.operand_range.contains(n)),
            "{:?}",
            draw
        );
    }
}
