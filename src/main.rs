//! # arith
//!
//! A small arithmetic expression language: numbers, variables, parentheses and
//! `+ - * /` with the usual precedence. Tokens are separated by whitespace.
//!
//! ## Usage
//!
//! - Evaluate an expression: `arith "( 2 + 3 ) * 4"` or `arith 2 + 3 '*' 4`
//! - Run a script file, one statement per line: `arith budget.calc`
//! - Pre-bind variables: `arith -D rate=0.2 "100 * rate"`
//! - Interactive shell: `arith`
//!
//! Set `ARITH_LOG=debug` to trace parsing and evaluation on stderr.

mod ast;
mod error;
mod interpreter;
mod parser;

use clap::Parser as ClapParser;
use error::Error;
use interpreter::Interpreter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The expression shipped with the original tool, written in prefix form.
/// The grammar is infix, so this reports a missing closing parenthesis.
const EXAMPLE_EXPRESSION: &str = "( + 2 ( * 3 4 ) )";

/// CLI arguments for arith.
#[derive(ClapParser)]
#[command(name = "arith")]
#[command(version = PKG_VERSION)]
#[command(about = "Evaluate whitespace-separated arithmetic expressions", long_about = None)]
struct Cli {
    /// Script file to run, or the first token of an expression
    #[arg(value_name = "EXPR_OR_FILE", allow_hyphen_values = true)]
    first_arg: Option<String>,

    /// Remaining expression tokens
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,

    /// Bind a variable before evaluating (NAME=VALUE, repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    defines: Vec<String>,

    /// Print the parsed tree before evaluating
    #[arg(long)]
    ast: bool,

    /// Print all variable bindings after evaluating
    #[arg(long)]
    vars: bool,

    /// Evaluate the bundled example expression
    #[arg(long, conflicts_with = "first_arg")]
    example: bool,
}

/// Entry point for the CLI tool.
fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut interpreter = Interpreter::new();
    for definition in &cli.defines {
        if let Err(e) = interpreter.define(definition) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.example {
        run_expression(&mut interpreter, EXAMPLE_EXPRESSION, &cli);
        return;
    }

    match cli.first_arg.as_deref() {
        Some(first_arg) => {
            let path = PathBuf::from(first_arg);
            if cli.rest.is_empty() && path.is_file() {
                run_script(&mut interpreter, &path, &cli);
            } else {
                let mut tokens = vec![first_arg.to_string()];
                tokens.extend(cli.rest.iter().cloned());
                run_expression(&mut interpreter, &tokens.join(" "), &cli);
            }
        }
        None => run_repl(&mut interpreter, cli.ast),
    }
}

/// Send diagnostics to stderr so stdout only carries results.
fn init_logging() {
    let filter = EnvFilter::try_from_env("ARITH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Parse and evaluate a single expression, exiting on the first error.
fn run_expression(interpreter: &mut Interpreter, source: &str, cli: &Cli) {
    match evaluate_line(interpreter, source, cli.ast) {
        Ok(value) => println!("Result: {}", value),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.vars {
        print_variables(interpreter);
    }
}

fn evaluate_line(interpreter: &mut Interpreter, source: &str, show_ast: bool) -> error::Result<f64> {
    let node = interpreter.parse(source)?;
    if show_ast {
        println!("AST: {}", node);
    }
    interpreter.execute(&node)
}

/// Run every statement of a script file against one shared environment.
///
/// Blank lines and lines starting with `#` are skipped. The first failing
/// line stops the script.
fn run_script(interpreter: &mut Interpreter, path: &Path, cli: &Cli) {
    let script = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let e = Error::Io {
                path: path.to_path_buf(),
                source,
            };
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match evaluate_line(interpreter, line, cli.ast) {
            Ok(value) => println!("Result: {}", value),
            Err(e) => {
                eprintln!("Error in {}:{}: {}", path.display(), index + 1, e);
                std::process::exit(1);
            }
        }
    }

    if cli.vars {
        print_variables(interpreter);
    }
}

fn print_variables(interpreter: &Interpreter) {
    let env = interpreter.environment();
    if env.is_empty() {
        println!("No variables defined.");
        return;
    }
    println!("Variables ({}):", env.len());
    for (name, value) in env.iter() {
        println!("  {} = {}", name, value);
    }
}

/// Start an interactive shell. Bindings persist between lines and errors do
/// not end the session.
fn run_repl(interpreter: &mut Interpreter, show_ast: bool) {
    println!("arith {}", PKG_VERSION);
    println!("Type 'vars' to list variables, 'exit' or Ctrl+D to quit\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => {
                // EOF (Ctrl+D)
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {
                let input = input.trim();

                if input == "exit" || input == "quit" {
                    println!("Goodbye!");
                    break;
                }

                if input.is_empty() {
                    continue;
                }

                if input == "vars" {
                    print_variables(interpreter);
                    continue;
                }

                match evaluate_line(interpreter, input, show_ast) {
                    Ok(value) => println!("{}", value),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}
