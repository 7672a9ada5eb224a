//! Coordinate generator expressions such as `-x+1/2` or `2x`.
//!
//! Grammar (whitespace ignored):
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary | primary)*      // juxtaposition multiplies
//! unary   := ('-' | '+') unary | primary
//! primary := number | 'x' | 'y' | '(' expr ')'
//! ```

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token at {pos}")]
    UnexpectedToken { pos: usize },
    #[error("invalid number {0:?}")]
    BadNumber(String),
    #[error("malformed coordinate list {0:?}")]
    MalformedCoordinates(String),
}

/// Parsed generator expression in the site variables `x` and `y`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    X,
    Y,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            Expr::Num(v) => *v,
            Expr::X => x,
            Expr::Y => y,
            Expr::Neg(e) => -e.eval(x, y),
            Expr::Add(a, b) => a.eval(x, y) + b.eval(x, y),
            Expr::Sub(a, b) => a.eval(x, y) - b.eval(x, y),
            Expr::Mul(a, b) => a.eval(x, y) * b.eval(x, y),
            Expr::Div(a, b) => a.eval(x, y) / b.eval(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Num(f64),
    X,
    Y,
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

fn tokenize(src: &str) -> Result<Vec<(usize, Token)>, ExprError> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let tok = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::BadNumber(text))?;
                out.push((start, Token::Num(value)));
                continue;
            }
            'x' | 'X' => Token::X,
            'y' | 'Y' => Token::Y,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::Open,
            ')' => Token::Close,
            other => return Err(ExprError::UnexpectedChar { ch: other, pos: i }),
        };
        out.push((i, tok));
        i += 1;
    }
    Ok(out)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    at: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.at).map(|&(_, t)| t)
    }

    fn pos(&self) -> usize {
        self.tokens.get(self.at).map_or(usize::MAX, |&(p, _)| p)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        self.at += 1;
        tok
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.bump();
                    lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
                }
                Some(Token::Minus) => {
                    self.bump();
                    lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.bump();
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.unary()?));
                }
                Some(Token::Slash) => {
                    self.bump();
                    lhs = Expr::Div(Box::new(lhs), Box::new(self.unary()?));
                }
                Some(Token::Num(_) | Token::X | Token::Y | Token::Open) => {
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.primary()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.bump();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.bump();
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let pos = self.pos();
        match self.bump() {
            Some(Token::Num(v)) => Ok(Expr::Num(v)),
            Some(Token::X) => Ok(Expr::X),
            Some(Token::Y) => Ok(Expr::Y),
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token::Close) => Ok(inner),
                    Some(_) => Err(ExprError::UnexpectedToken { pos: self.pos() }),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(_) => Err(ExprError::UnexpectedToken { pos }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

/// Parse one coordinate expression.
pub fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser { tokens, at: 0 };
    let expr = parser.expr()?;
    if parser.at < parser.tokens.len() {
        return Err(ExprError::UnexpectedToken { pos: parser.pos() });
    }
    Ok(expr)
}

/// Split a generator list like `(x,y) (-x,-y)` into `(f, g)` source pairs.
pub fn split_coordinates(src: &str) -> Result<Vec<(String, String)>, ExprError> {
    let malformed = || ExprError::MalformedCoordinates(src.to_string());
    let mut pairs = Vec::new();
    let mut chars = src.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() || ch == ',' || ch == ';' {
            continue;
        }
        if ch != '(' {
            return Err(malformed());
        }
        let mut depth = 1;
        let mut comma = None;
        let mut end = None;
        for (i, c) in chars.by_ref() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                ',' if depth == 1 => {
                    if comma.is_some() {
                        return Err(malformed());
                    }
                    comma = Some(i);
                }
                _ => {}
            }
        }
        let (Some(comma), Some(end)) = (comma, end) else {
            return Err(malformed());
        };
        pairs.push((
            src[start + 1..comma].trim().to_string(),
            src[comma + 1..end].trim().to_string(),
        ));
    }
    if pairs.is_empty() {
        return Err(malformed());
    }
    Ok(pairs)
}
