use std::fmt;

/// A parse error from the sandbox script language.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
    /// 1-based source column number where the error occurred.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: msg.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at {}:{}: {}",
            self.line, self.col, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// An evaluation error: unknown identifier or method, arity or type
/// mismatch, or a scene builder failure. Positioned at the statement
/// that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl EvalError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: msg.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eval error at {}:{}: {}",
            self.line, self.col, self.message
        )
    }
}

impl std::error::Error for EvalError {}

/// Either phase of running a source buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Parse(err) => err.fmt(f),
            ScriptError::Eval(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<ParseError> for ScriptError {
    fn from(err: ParseError) -> Self {
        ScriptError::Parse(err)
    }
}

impl From<EvalError> for ScriptError {
    fn from(err: EvalError) -> Self {
        ScriptError::Eval(err)
    }
}
