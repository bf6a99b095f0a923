use std::fmt;

/// Broad failure categories reported by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    DuplicateConstant,
    UnknownConstant,
    Emit,
    Xml,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::DuplicateConstant => "duplicate constant",
            ErrorKind::UnknownConstant => "unknown constant",
            ErrorKind::Emit => "emit error",
            ErrorKind::Xml => "xml error",
            ErrorKind::Io => "io error",
        };
        f.write_str(s)
    }
}

/// The main error type for parsing, resolving and emitting config documents.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfXmlError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for characters that cannot start any token.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    NestingTooDeep {
        limit: usize,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when `var NAME` is declared a second time.
    DuplicateConstant {
        name: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when `|NAME|` has no earlier declaration.
    UnknownConstant {
        name: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A constant reference reached a stage that only accepts resolved values.
    Unresolved {
        name: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidName {
        name: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    XmlError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    IoError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ConfXmlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfXmlError::SyntaxError { .. }
            | ConfXmlError::InvalidToken { .. }
            | ConfXmlError::UnexpectedEof { .. }
            | ConfXmlError::UnexpectedCharacter { .. }
            | ConfXmlError::NestingTooDeep { .. } => ErrorKind::Syntax,
            ConfXmlError::DuplicateConstant { .. } => ErrorKind::DuplicateConstant,
            ConfXmlError::UnknownConstant { .. } => ErrorKind::UnknownConstant,
            ConfXmlError::Unresolved { .. } | ConfXmlError::InvalidName { .. } => ErrorKind::Emit,
            ConfXmlError::XmlError { .. } => ErrorKind::Xml,
            ConfXmlError::IoError { .. } => ErrorKind::Io,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ConfXmlError::SyntaxError { code, .. }
            | ConfXmlError::InvalidToken { code, .. }
            | ConfXmlError::UnexpectedEof { code, .. }
            | ConfXmlError::UnexpectedCharacter { code, .. }
            | ConfXmlError::NestingTooDeep { code, .. }
            | ConfXmlError::DuplicateConstant { code, .. }
            | ConfXmlError::UnknownConstant { code, .. }
            | ConfXmlError::Unresolved { code, .. }
            | ConfXmlError::InvalidName { code, .. }
            | ConfXmlError::XmlError { code, .. }
            | ConfXmlError::IoError { code, .. } => *code,
        }
    }

    /// Source position of the failure, when it has one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ConfXmlError::SyntaxError { line, column, .. }
            | ConfXmlError::InvalidToken { line, column, .. }
            | ConfXmlError::UnexpectedEof { line, column, .. }
            | ConfXmlError::UnexpectedCharacter { line, column, .. }
            | ConfXmlError::NestingTooDeep { line, column, .. }
            | ConfXmlError::DuplicateConstant { line, column, .. }
            | ConfXmlError::UnknownConstant { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for ConfXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfXmlError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[CONFXML] Syntax Error at {}:{}: {}{}",
                    line, column, message, suffix(hint, code)),
            ConfXmlError::InvalidToken { token, line, column, hint, code } =>
                write!(f, "[CONFXML] Syntax Error: unexpected token {} at {}:{}{}",
                    token, line, column, suffix(hint, code)),
            ConfXmlError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[CONFXML] Syntax Error: unexpected end of input at {}:{}: {}{}",
                    line, column, message, suffix(hint, code)),
            ConfXmlError::UnexpectedCharacter { character, line, column, hint, code } =>
                write!(f, "[CONFXML] Syntax Error: unexpected character '{}' at {}:{}{}",
                    character.escape_debug(), line, column, suffix(hint, code)),
            ConfXmlError::NestingTooDeep { limit, line, column, hint, code } =>
                write!(f, "[CONFXML] Syntax Error: nesting deeper than {} at {}:{}{}",
                    limit, line, column, suffix(hint, code)),
            ConfXmlError::DuplicateConstant { name, line, column, hint, code } =>
                write!(f, "[CONFXML] Duplicate Constant '{}' at {}:{}{}",
                    name, line, column, suffix(hint, code)),
            ConfXmlError::UnknownConstant { name, line, column, hint, code } =>
                write!(f, "[CONFXML] Unknown Constant '{}' at {}:{}{}",
                    name, line, column, suffix(hint, code)),
            ConfXmlError::Unresolved { name, hint, code } =>
                write!(f, "[CONFXML] Emit Error: unresolved constant reference '{}'{}",
                    name, suffix(hint, code)),
            ConfXmlError::InvalidName { name, hint, code } =>
                write!(f, "[CONFXML] Emit Error: '{}' is not a valid element name{}",
                    name, suffix(hint, code)),
            ConfXmlError::XmlError { message, hint, code } =>
                write!(f, "[CONFXML] XML Error: {}{}", message, suffix(hint, code)),
            ConfXmlError::IoError { message, hint, code } =>
                write!(f, "[CONFXML] IO Error: {}{}", message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for ConfXmlError {}

impl From<std::io::Error> for ConfXmlError {
    fn from(e: std::io::Error) -> Self {
        ConfXmlError::IoError {
            message: e.to_string(),
            hint: None,
            code: Some(502),
        }
    }
}
