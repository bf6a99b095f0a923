use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

pub(super) fn skip_whitespace(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        if c.is_whitespace() {
            bump(lexer);
        } else {
            break;
        }
    }
}

/// Character after the current one, without consuming anything
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Remember where the token about to be scanned starts
pub(super) fn mark_token_start(lexer: &mut Lexer) {
    lexer.token_line = lexer.line;
    lexer.token_column = lexer.column + 1;
}
