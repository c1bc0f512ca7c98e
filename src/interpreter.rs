// Interpreter session: one environment evaluated against parsed input

use crate::ast::Node;
use crate::error::{Error, Result};
use crate::parser::Parser;
use std::collections::HashMap;
use tracing::debug;

/// Variable bindings visible to an evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| Error::UndefinedVariable(name.to_string()))
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Bindings ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        let mut bindings: Vec<_> = self
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings.into_iter()
    }
}

pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Bind a `NAME=VALUE` definition, as given on the command line.
    pub fn define(&mut self, definition: &str) -> Result<()> {
        let invalid = || Error::InvalidDefinition(definition.to_string());

        let (name, value) = definition.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(invalid());
        }
        let value = value.trim().parse::<f64>().map_err(|_| invalid())?;

        debug!(name, value, "defining variable");
        self.env.set(name, value);
        Ok(())
    }

    pub fn parse(&self, source: &str) -> Result<Node> {
        Parser::new(source).parse()
    }

    /// Parse `source` and evaluate it against this session's environment.
    pub fn evaluate(&mut self, source: &str) -> Result<f64> {
        let node = self.parse(source)?;
        self.execute(&node)
    }

    pub fn execute(&mut self, node: &Node) -> Result<f64> {
        debug!(%node, "evaluating");
        let value = node.evaluate(&mut self.env)?;
        debug!(value, "evaluated");
        Ok(value)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
