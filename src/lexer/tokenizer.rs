use super::*;
use super::scanner::{bump, mark_token_start, peek_second, skip_whitespace};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, ConfXmlError> {
    skip_whitespace(lexer);
    mark_token_start(lexer);

    match lexer.peek {
        Some('|') => tokenize_symbol(lexer, Token::Pipe),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some(';') => tokenize_symbol(lexer, Token::Semicolon),
        Some(':') => tokenize_symbol(lexer, Token::Colon),
        Some('+') | Some('-') => tokenize_signed_number(lexer),
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer, String::new()),
        Some(c) if c.is_ascii_alphabetic() => tokenize_identifier_or_keyword(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, ConfXmlError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_signed_number(lexer: &mut Lexer) -> Result<Token, ConfXmlError> {
    // A sign must be glued to the digits that follow it.
    match peek_second(lexer) {
        Some(c) if c.is_ascii_digit() => {
            let mut num = String::new();
            if let Some(sign) = bump(lexer) {
                num.push(sign);
            }
            tokenize_number(lexer, num)
        }
        _ => {
            let sign = lexer.peek.unwrap_or('-');
            bump(lexer);
            Err(ConfXmlError::UnexpectedCharacter {
                character: sign,
                line: lexer.token_line,
                column: lexer.token_column,
                hint: Some("A sign must be directly followed by digits".into()),
                code: Some(101),
            })
        }
    }
}

fn tokenize_number(lexer: &mut Lexer, mut num: String) -> Result<Token, ConfXmlError> {
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    if matches!(lexer.peek, Some('.') | Some('e') | Some('E')) {
        return Err(ConfXmlError::SyntaxError {
            message: format!("Invalid number '{}{}'", num, lexer.peek.unwrap_or_default()),
            line: lexer.token_line,
            column: lexer.token_column,
            hint: Some("Only integer numbers are supported".into()),
            code: Some(102),
        });
    }

    num.parse::<i64>()
        .map(Token::Number)
        .map_err(|_| ConfXmlError::SyntaxError {
            message: format!("Number '{}' does not fit in a 64-bit integer", num),
            line: lexer.token_line,
            column: lexer.token_column,
            hint: None,
            code: Some(103),
        })
}

fn tokenize_identifier_or_keyword(lexer: &mut Lexer) -> Result<Token, ConfXmlError> {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    let token = match ident.as_str() {
        "var" => Token::Var,
        _ => Token::Ident(ident),
    };

    Ok(token)
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, ConfXmlError> {
    bump(lexer);
    Err(ConfXmlError::UnexpectedCharacter {
        character: ch,
        line: lexer.token_line,
        column: lexer.token_column,
        hint: Some("Unexpected character in input".into()),
        code: Some(104),
    })
}
