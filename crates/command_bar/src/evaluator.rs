//! Arithmetic mode of the command bar: `number (op number)*` with the usual
//! precedence, plus chaining onto the previous result.

use shared::error::{CoreError, ErrorCode};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Evaluated(f64),
    Declined(ErrorCode),
}

impl Evaluation {
    pub fn evaluated(&self) -> bool {
        matches!(self, Self::Evaluated(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Evaluated(value) => Some(*value),
            Self::Declined(_) => None,
        }
    }
}

/// The single chained value of an input session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalculatorState {
    last_result: Option<f64>,
}

impl CalculatorState {
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn record(&mut self, value: f64) {
        self.last_result = Some(value);
    }

    pub fn reset(&mut self) {
        self.last_result = None;
    }

    /// Called on every keystroke; anything but a leading operator ends the chain.
    pub fn observe_input(&mut self, text: &str) {
        if self.last_result.is_some() && !starts_with_operator(text) {
            debug!("calculator chain reset");
            self.last_result = None;
        }
    }
}

pub fn starts_with_operator(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .and_then(Operator::from_char)
        .is_some()
}

/// Never fails outward: anything that is not a finite arithmetic result is
/// reported as `Declined` so the router can take the text instead.
pub fn evaluate(raw_input: &str, last_result: Option<f64>) -> Evaluation {
    let expression = chain_onto(raw_input, last_result);
    match try_evaluate(&expression) {
        Ok(value) => Evaluation::Evaluated(value),
        Err(err) => {
            debug!(code = ?err.code, reason = %err.message, "expression declined");
            Evaluation::Declined(err.code)
        }
    }
}

pub fn try_evaluate(expression: &str) -> Result<f64, CoreError> {
    let tokens = tokenize(expression)?;
    let postfix = to_postfix(&tokens);
    let value = eval_postfix(&postfix)?;
    if !value.is_finite() {
        return Err(CoreError::new(
            ErrorCode::NonFinite,
            format!("result {value} is not finite"),
        ));
    }
    Ok(value)
}

/// Text shown in the field after a successful evaluation.
pub fn display_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn chain_onto(raw_input: &str, last_result: Option<f64>) -> String {
    match last_result {
        Some(last) if starts_with_operator(raw_input) => {
            format!("{} {raw_input}", display_value(last))
        }
        _ => raw_input.to_string(),
    }
}

/// Scans and validates in one pass. A leading sign is folded into the first
/// operand.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CoreError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut expect_operand = true;
    let mut seen_sign = false;
    let mut negate_first = false;

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if expect_operand {
            if tokens.is_empty() && !seen_sign && (c == '+' || c == '-') {
                chars.next();
                seen_sign = true;
                negate_first = c == '-';
                continue;
            }
            if !c.is_ascii_digit() {
                return Err(grammar_error(input));
            }

            let mut end = start;
            let mut seen_point = false;
            while let Some(&(idx, d)) = chars.peek() {
                if d.is_ascii_digit() {
                    end = idx + d.len_utf8();
                    chars.next();
                } else if d == '.' && !seen_point {
                    seen_point = true;
                    chars.next();
                    match chars.peek() {
                        Some(&(_, next)) if next.is_ascii_digit() => {}
                        _ => return Err(grammar_error(input)),
                    }
                } else {
                    break;
                }
            }

            let mut number: f64 = input[start..end]
                .parse()
                .map_err(|_| grammar_error(input))?;
            if tokens.is_empty() && negate_first {
                number = -number;
            }
            tokens.push(Token::Number(number));
            expect_operand = false;
        } else {
            let Some(op) = Operator::from_char(c) else {
                return Err(grammar_error(input));
            };
            chars.next();
            tokens.push(Token::Op(op));
            expect_operand = true;
        }
    }

    if tokens.is_empty() {
        return Err(CoreError::new(ErrorCode::NoTokens, "no numeric tokens"));
    }
    if expect_operand {
        return Err(grammar_error(input));
    }
    Ok(tokens)
}

pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Operator> = Vec::new();

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Op(op) => {
                while let Some(&top) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Op(top));
                    operators.pop();
                }
                operators.push(op);
            }
        }
    }

    while let Some(op) = operators.pop() {
        output.push(Token::Op(op));
    }
    output
}

pub fn eval_postfix(postfix: &[Token]) -> Result<f64, CoreError> {
    if postfix.is_empty() {
        return Err(CoreError::new(ErrorCode::NoTokens, "empty expression"));
    }

    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());
    for token in postfix {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::Op(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(CoreError::new(ErrorCode::Malformed, "operand stack underflow"));
                };
                stack.push(op.apply(lhs, rhs));
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(CoreError::new(
            ErrorCode::Malformed,
            format!("{} values left on the stack", stack.len()),
        )),
    }
}

fn grammar_error(input: &str) -> CoreError {
    CoreError::new(
        ErrorCode::Grammar,
        format!("'{input}' is not an arithmetic expression"),
    )
}

#[cfg(test)]
#[path = "tests/evaluator_tests.rs"]
mod tests;
