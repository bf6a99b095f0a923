use super::*;
use crate::ast::ConstDecl;

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, ConfXmlError> {
    let mut constants = Vec::new();

    // `var` opens a declaration only when a NAME follows; `var 5` is a config
    // entry called "var".
    while let Some(Token::Var) = parser.peek() {
        match parser.peek_second() {
            Some(Token::Ident(_)) | Some(Token::Var) => constants.push(parse_const_decl(parser)?),
            _ => break,
        }
    }

    let (config_name, _, _) = parser.expect_ident("config entry name", 203)?;
    let config_value = value::parse_value(parser)?;

    if parser.peek() != Some(&Token::Eof) {
        return Err(parser.unexpected(
            "end of input",
            Some("A document holds exactly one config entry, after all 'var' declarations"),
            205,
        ));
    }

    Ok(Document { constants, config_name, config_value })
}

fn parse_const_decl(parser: &mut Parser) -> Result<ConstDecl, ConfXmlError> {
    parser.bump()?; // consume 'var'
    let (name, line, column) = parser.expect_ident("constant name after 'var'", 204)?;
    let value = value::parse_value(parser)?;
    Ok(ConstDecl { name, value, line, column })
}
