use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::io::Write;

/// Helper to get the compiled binary path
fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_arith"))
}

/// Helper to create a temporary directory for tests
fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to write a script file into a directory
fn create_script(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .env_remove("ARITH_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_version_flag() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_single_argument_expression() {
    let output = run(&["2 + 3 * 4"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Result: 14");
}

#[test]
fn test_expression_split_across_arguments() {
    let output = run(&["(", "2", "+", "3", ")", "*", "4"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Result: 20");
}

#[test]
fn test_left_associativity() {
    let output = run(&["8 - 4 - 2"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Result: 2");
}

#[test]
fn test_expression_starting_with_negative_literal() {
    let output = run(&["-2 + 5"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Result: 3");

    let output = run(&["-2", "+", "5"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Result: 3");
}

#[test]
fn test_define_flag_still_parsed_as_flag() {
    let output = run(&["-D", "n=-4", "-2 * n"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Result: 8");
}

#[test]
fn test_fractional_result() {
    let output = run(&["7 / 2"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Result: 3.5");
}

#[test]
fn test_division_by_zero_fails() {
    let output = run(&["1 / ( 2 - 2 )"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: division by zero"));
}

#[test]
fn test_undefined_variable_fails() {
    let output = run(&["x + 1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: undefined variable: x"));
}

#[test]
fn test_missing_closing_parenthesis() {
    let output = run(&["( 1 + 2"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing closing parenthesis"));
}

#[test]
fn test_trailing_token() {
    let output = run(&["1 + 2 )"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected token: )"));
}

#[test]
fn test_empty_expression() {
    let output = run(&[""]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected end of input"));
}

#[test]
fn test_example_flag_reports_prefix_form() {
    let output = run(&["--example"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing closing parenthesis"));
}

#[test]
fn test_define_flag() {
    let output = run(&["-D", "rate=0.25", "--define", "base=200", "base * rate"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Result: 50");
}

#[test]
fn test_define_flag_rejects_malformed() {
    let output = run(&["-D", "rate", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid definition 'rate'"));
}

#[test]
fn test_assignment_with_vars_flag() {
    let output = run(&["--vars", "x = 6 / 4"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Result: 1.5"));
    assert!(stdout.contains("Variables (1):"));
    assert!(stdout.contains("x = 1.5"));
}

#[test]
fn test_ast_flag() {
    let output = run(&["--ast", "1 + 2 * 3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AST: (1 + (2 * 3))"));
    assert!(stdout.contains("Result: 7"));
}

#[test]
fn test_script_file_shares_environment() {
    let temp_dir = create_temp_dir();
    let script = create_script(temp_dir.path(), "budget.calc", r#"
# monthly budget
income = 3000
rent = income * 0.4

income - rent
"#);

    let output = run(&[script.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let results: Vec<_> = stdout.lines().collect();
    assert_eq!(results, ["Result: 3000", "Result: 1200", "Result: 1800"]);
}

#[test]
fn test_script_file_stops_at_first_error() {
    let temp_dir = create_temp_dir();
    let script = create_script(temp_dir.path(), "broken.calc", "a = 1\nb = a / 0\na + 1\n");

    let output = run(&[script.to_str().unwrap()]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Result: 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.calc:2: division by zero"));
}

#[test]
fn test_repl_keeps_bindings_and_survives_errors() {
    let mut child = Command::new(get_binary_path())
        .env_remove("ARITH_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn REPL");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"x = 4\ny + 1\nx * x\nvars\nexit\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("> 4"));
    assert!(stdout.contains("> 16"));
    assert!(stdout.contains("x = 4"));
    assert!(stdout.contains("Goodbye!"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: undefined variable: y"));
}

#[test]
fn test_repl_ast_flag_prints_tree() {
    let mut child = Command::new(get_binary_path())
        .arg("--ast")
        .env_remove("ARITH_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn REPL");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"2 * ( 3 + 1 )\nexit\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AST: (2 * (3 + 1))"));
    assert!(stdout.contains("\n8\n"));
}
