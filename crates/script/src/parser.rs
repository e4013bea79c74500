use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f32),
    Str(String),
    /// `[x, y, z]`; components resolved to numbers at evaluation time.
    Vector(Vec<Expr>),
    Ident(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let {
        name: String,
        value: Expr,
        line: usize,
        col: usize,
    },
    /// `scene.Method(args);`
    Call {
        method: String,
        args: Vec<Expr>,
        line: usize,
        col: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .or_else(|| self.tokens.last().map(|t| (t.line, t.col)))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self
            .tokens
            .get(self.pos)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek().clone() {
            Token::Ident(s) => {
                self.advance();
                Ok(s)
            }
            tok => Err(self.err(format!("expected identifier, got {tok:?}"))),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected {:?}, got {:?}", expected, self.peek())))
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        while self.peek() != &Token::Eof {
            program.statements.push(self.parse_statement()?);
        }
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let (line, col) = self.current_pos();
        match self.peek() {
            Token::Let => {
                self.advance();
                let name = self.expect_ident()?;
                self.expect_token(&Token::Eq)?;
                let value = self.parse_expr()?;
                self.expect_token(&Token::Semi)?;
                Ok(Stmt::Let {
                    name,
                    value,
                    line,
                    col,
                })
            }
            Token::Ident(name) if name == "scene" => {
                self.advance();
                self.expect_token(&Token::Dot)?;
                let method = self.expect_ident()?;
                self.expect_token(&Token::LParen)?;
                let args = self.parse_args()?;
                self.expect_token(&Token::Semi)?;
                Ok(Stmt::Call {
                    method,
                    args,
                    line,
                    col,
                })
            }
            tok => Err(self.err(format!(
                "expected `let` or a `scene.` call, got {tok:?}"
            ))),
        }
    }

    /// Parses `arg (, arg)* )` with the opening paren already consumed.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.peek() == &Token::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            match self.advance() {
                Token::Comma => continue,
                Token::RParen => break,
                tok => return Err(self.err(format!("expected `,` or `)`, got {tok:?}"))),
            }
        }
        Ok(args)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Ident(s) => Ok(Expr::Ident(s)),
            Token::LBracket => {
                let mut parts = Vec::new();
                loop {
                    parts.push(self.parse_expr()?);
                    match self.advance() {
                        Token::Comma => continue,
                        Token::RBracket => break,
                        tok => {
                            return Err(self.err(format!("expected `,` or `]`, got {tok:?}")));
                        }
                    }
                }
                if parts.len() != 3 {
                    return Err(self.err(format!(
                        "vector literal needs 3 components, got {}",
                        parts.len()
                    )));
                }
                Ok(Expr::Vector(parts))
            }
            tok => Err(self.err(format!("expected a value, got {tok:?}"))),
        }
    }
}

/// Parse an executable source buffer into a [`Program`].
pub fn parse_str(src: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::{Expr, Stmt, parse_str};

    #[test]
    fn parses_let_and_call() {
        let program = parse_str("let r = 1.5;\nscene.AddSphereMesh([0, 0, 0], r, 2, WHITE);\n")
            .expect("parse");
        assert_eq!(program.statements.len(), 2);
        match &program.statements[0] {
            Stmt::Let { name, value, .. } => {
                assert_eq!(name, "r");
                assert_eq!(*value, Expr::Number(1.5));
            }
            other => panic!("expected let, got {other:?}"),
        }
        match &program.statements[1] {
            Stmt::Call { method, args, line, .. } => {
                assert_eq!(method, "AddSphereMesh");
                assert_eq!(args.len(), 4);
                assert_eq!(*line, 2);
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn vector_literals_need_three_components() {
        let err = parse_str("scene.AddFloatingText(\"x\", [1, 2]);").unwrap_err();
        assert!(err.message.contains("3 components"));
    }

    #[test]
    fn only_scene_calls_are_statements() {
        let err = parse_str("window.alert(\"hi\");").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("scene"));
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        assert!(parse_str("let r = 1").is_err());
    }

    #[test]
    fn empty_argument_lists_parse() {
        let program = parse_str("scene.Clear();").expect("parse");
        match &program.statements[0] {
            Stmt::Call { args, .. } => assert!(args.is_empty()),
            other => panic!("expected call, got {other:?}"),
        }
    }
}
