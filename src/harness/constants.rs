// Defaults for the evaluator harness
pub const DEFAULT_ROUNDS: usize = 3;
pub const DEFAULT_REFERENCE_URL: &str = "http://api.mathjs.org/v4/";
pub const DEFAULT_CANDIDATE_COMMAND: [&str; 3] = ["java", "-jar", "app-1.0.0.jar"];
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const ABSOLUTE_TOLERANCE: f64 = 1e-9;
pub const RELATIVE_TOLERANCE: f64 = 1e-9;
pub const CANDIDATE_FILE_PREFIX: &str = "calcfuzz-";

/// Exit codes meaning the command itself could not be executed
/// (126: not executable, 127: not found)
pub const LAUNCH_FAILURE_EXIT_CODES: [i32; 2] = [126, 127];
