// Default configuration for the expression generator
pub const DEFAULT_LENGTH: usize = 1000;
pub const MIN_LENGTH: usize = 2;
pub const DEFAULT_OPERATORS: [char; 4] = ['+', '-', '*', '/'];
pub const DEFAULT_FUNCTIONS: [&str; 4] = ["abs", "sqrt", "max", "min"];
pub const DEFAULT_VARIADIC_FUNCTIONS: [&str; 2] = ["max", "min"];
pub const OPERAND_RANGE: (i64, i64) = (1, 25);
pub const PAREN_OPERAND_RANGE: (i64, i64) = (1, 25);
pub const FIRST_ARGUMENT_RANGE: (i64, i64) = (1, 9);
pub const EXTRA_ARGUMENT_RANGE: (i64, i64) = (-100, 100);
pub const MAX_EXTRA_ARGUMENTS: usize = 14;
pub const FUNCTION_WEIGHT: u32 = 10;
pub const PAREN_WEIGHT: u32 = 45;
pub const OPERAND_WEIGHT: u32 = 45;
pub const CLOSE_PAREN_PROBABILITY: f64 = 0.5;
