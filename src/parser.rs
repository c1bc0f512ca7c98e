// Recursive-descent parser over whitespace-separated tokens
//
// statement  := IDENTIFIER '=' expression | expression
// expression := term ( ('+' | '-') term )*
// term       := factor ( ('*' | '/') factor )*
// factor     := '(' expression ')' | NUMBER | IDENTIFIER

use crate::ast::Node;
use crate::error::{Error, Result};
use tracing::trace;

pub struct Parser {
    tokens: Vec<String>,
    pos: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        let tokens = input.split_whitespace().map(str::to_string).collect();
        Self { tokens, pos: 0 }
    }

    /// Parse one complete statement, rejecting any trailing tokens.
    pub fn parse(&mut self) -> Result<Node> {
        let node = self.parse_statement()?;

        if let Some(token) = self.peek() {
            return Err(Error::UnexpectedToken(token.to_string()));
        }

        Ok(node)
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn advance(&mut self) -> Result<String> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(Error::UnexpectedEndOfInput)?;
        self.pos += 1;
        Ok(token)
    }

    /// Consume the current token if it is one of `symbols`.
    fn take_operator(&mut self, symbols: [&str; 2]) -> Option<String> {
        let token = self.peek().filter(|token| symbols.contains(token))?;
        let token = token.to_string();
        self.pos += 1;
        Some(token)
    }

    fn parse_statement(&mut self) -> Result<Node> {
        let next = self.tokens.get(self.pos + 1).map(String::as_str);
        let is_assignment = match (self.peek(), next) {
            (Some(name), Some("=")) => is_assignable(name),
            _ => false,
        };

        if !is_assignment {
            return self.parse_expression();
        }

        let name = self.advance()?;
        self.advance()?;
        trace!(%name, "parsing assignment");
        let value = self.parse_expression()?;
        Ok(Node::assignment(name, value))
    }

    fn parse_expression(&mut self) -> Result<Node> {
        let mut node = self.parse_term()?;

        while let Some(symbol) = self.take_operator(["+", "-"]) {
            let right = self.parse_term()?;
            node = Node::binary(&symbol, node, right)?;
        }

        Ok(node)
    }

    fn parse_term(&mut self) -> Result<Node> {
        let mut node = self.parse_factor()?;

        while let Some(symbol) = self.take_operator(["*", "/"]) {
            let right = self.parse_factor()?;
            node = Node::binary(&symbol, node, right)?;
        }

        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<Node> {
        let token = self.advance()?;

        if token == "(" {
            let node = self.parse_expression()?;
            if self.peek() != Some(")") {
                return Err(Error::MissingClosingParenthesis);
            }
            self.pos += 1;
            return Ok(node);
        }

        if let Ok(value) = token.parse::<f64>() {
            return Ok(Node::Number(value));
        }

        // Anything else is taken as a variable name, operators included
        trace!(name = %token, "treating token as variable");
        Ok(Node::Variable(token))
    }
}

fn is_assignable(token: &str) -> bool {
    token != "(" && token != ")" && token.parse::<f64>().is_err()
}
