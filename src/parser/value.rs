use super::*;

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, ConfXmlError> {
    match parser.peek() {
        Some(Token::Number(_)) => parse_number_value(parser),
        Some(Token::LBracket) => parse_array_value(parser),
        Some(Token::LBrace) => parse_dict_value(parser),
        Some(Token::Pipe) => parse_const_ref_value(parser),
        Some(Token::Ident(_)) => Err(parser.unexpected(
            "a value",
            Some("Constant references are written as |NAME|"),
            210,
        )),
        _ => Err(parser.unexpected("a value", None, 210)),
    }
}

fn parse_number_value(parser: &mut Parser) -> Result<Value, ConfXmlError> {
    let Some(&Token::Number(n)) = parser.peek() else {
        return Err(parser.unexpected("a number", None, 210));
    };
    parser.bump()?;
    Ok(Value::Int(n))
}

fn parse_const_ref_value(parser: &mut Parser) -> Result<Value, ConfXmlError> {
    parser.bump()?; // consume opening |
    let (name, line, column) = parser.expect_ident("constant name after '|'", 211)?;
    parser.expect(Token::Pipe, Some("Close the reference as |NAME|"), 211)?;
    Ok(Value::ConstRef { name, line, column })
}

fn parse_array_value(parser: &mut Parser) -> Result<Value, ConfXmlError> {
    parser.enter()?;
    parser.bump()?; // consume [
    let mut items = Vec::new();

    if let Some(Token::RBracket) = parser.peek() {
        parser.bump()?;
        parser.leave();
        return Ok(Value::Array(items));
    }

    loop {
        items.push(parse_value(parser)?);
        match parser.peek() {
            Some(Token::Comma) => {
                parser.bump()?;
            }
            Some(Token::RBracket) => {
                parser.bump()?;
                break;
            }
            _ => {
                return Err(parser.unexpected(
                    "',' or ']'",
                    Some("Array items are separated by commas"),
                    206,
                ));
            }
        }
    }

    parser.leave();
    Ok(Value::Array(items))
}

fn parse_dict_value(parser: &mut Parser) -> Result<Value, ConfXmlError> {
    parser.enter()?;
    parser.bump()?; // consume {
    let mut pairs = Vec::new();

    if let Some(Token::RBrace) = parser.peek() {
        parser.bump()?;
        parser.leave();
        return Ok(Value::Dict(pairs));
    }

    loop {
        pairs.push(parse_pair(parser)?);
        match parser.peek() {
            Some(Token::Semicolon) => {
                parser.bump()?;
            }
            Some(Token::RBrace) => {
                parser.bump()?;
                break;
            }
            _ => {
                return Err(parser.unexpected(
                    "';' or '}'",
                    Some("Dictionary pairs are separated by semicolons"),
                    207,
                ));
            }
        }
    }

    parser.leave();
    Ok(Value::Dict(pairs))
}

fn parse_pair(parser: &mut Parser) -> Result<(String, Value), ConfXmlError> {
    let (key, _, _) = parser.expect_ident("dictionary key", 208)?;
    parser.expect(Token::Colon, Some("Dictionary pairs are written as key: value"), 208)?;
    let value = parse_value(parser)?;
    Ok((key, value))
}
