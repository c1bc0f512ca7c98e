// Abstract Syntax Tree definitions and evaluation

use crate::error::{Error, Result};
use crate::interpreter::Environment;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    fn apply(self, left: f64, right: f64) -> Result<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Sub => Ok(left - right),
            Operator::Mul => Ok(left * right),
            Operator::Div => {
                // -0.0 == 0.0, so both signed zeros are rejected
                if right == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(symbol: &str) -> Result<Self> {
        match symbol {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            other => Err(Error::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Variable(String),
    BinaryOp {
        operator: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
    Assignment {
        name: String,
        value: Box<Node>,
    },
}

impl Node {
    /// Build a binary node from a raw operator symbol.
    ///
    /// Fails with `UnknownOperator` for anything outside `+ - * /`, which is
    /// how trees assembled outside the parser get their operators checked.
    pub fn binary(symbol: &str, left: Node, right: Node) -> Result<Node> {
        Ok(Node::BinaryOp {
            operator: symbol.parse()?,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn assignment(name: impl Into<String>, value: Node) -> Node {
        Node::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    /// Evaluate the tree against `env`.
    ///
    /// Operands are evaluated left to right and the first error aborts the
    /// walk. Only `Assignment` mutates the environment, and only once its
    /// value has been computed successfully.
    pub fn evaluate(&self, env: &mut Environment) -> Result<f64> {
        match self {
            Node::Number(value) => Ok(*value),
            Node::Variable(name) => env.get(name),
            Node::BinaryOp {
                operator,
                left,
                right,
            } => {
                let left = left.evaluate(env)?;
                let right = right.evaluate(env)?;
                operator.apply(left, right)
            }
            Node::Assignment { name, value } => {
                let value = value.evaluate(env)?;
                env.set(name, value);
                Ok(value)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),
            Node::Variable(name) => f.write_str(name),
            Node::BinaryOp {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Node::Assignment { name, value } => write!(f, "{} = {}", name, value),
        }
    }
}
