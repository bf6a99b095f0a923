#[cfg(test)]
use super::*;
#[cfg(test)]
use crate::ErrorKind;

fn parse(input: &str) -> Result<Document, ConfXmlError> {
    Parser::new(input)?.parse_document()
}

#[test]
fn test_parser_basic_document() {
    let input = r#"
var A 1
var B [|A|, 2]
root {a: |B|}
"#;

    let doc = parse(input).expect("Failed to parse document");

    println!("--- Parsed Document ---");
    println!("{:#?}", doc);

    assert_eq!(doc.constants.len(), 2);
    assert_eq!(doc.constants[0].name, "A");
    assert_eq!(doc.constants[0].value, Value::Int(1));
    assert_eq!((doc.constants[1].line, doc.constants[1].column), (3, 5));
    assert_eq!(doc.config_name, "root");

    match &doc.constants[1].value {
        Value::Array(items) => {
            assert_eq!(items.len(), 2);
            assert!(matches!(&items[0], Value::ConstRef { name, line: 3, column: 9 } if name == "A"));
            assert_eq!(items[1], Value::Int(2));
        }
        other => panic!("Expected 'B' to be an array, got {:?}", other),
    }

    let pairs = doc.config_value.as_dict().expect("Expected root to be a dict");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "a");
    assert!(matches!(&pairs[0].1, Value::ConstRef { name, .. } if name == "B"));
}

#[test]
fn test_scalar_config_without_constants() {
    let doc = parse("x 5").unwrap();
    assert!(doc.constants.is_empty());
    assert_eq!(doc.config_name, "x");
    assert_eq!(doc.config_value, Value::Int(5));
}

#[test]
fn test_empty_containers() {
    let doc = parse("root { e: []; d: {} }").unwrap();
    assert_eq!(
        doc.config_value,
        Value::Dict(vec![
            ("e".into(), Value::Array(vec![])),
            ("d".into(), Value::Dict(vec![])),
        ])
    );
}

#[test]
fn test_duplicate_keys_are_kept_in_order() {
    let doc = parse("root {a:1; b:2; a:3}").unwrap();
    let keys: Vec<&str> = doc
        .config_value
        .as_dict()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["a", "b", "a"]);
}

#[test]
fn test_whitespace_and_newlines_are_insignificant() {
    let compact = parse("var A 1 root{a:[|A|,2];b:{c:3}}").unwrap();
    let spread = parse("var\n  A\n  1\nroot {\n  a : [ |A| ,\n 2 ] ;\n  b : { c : 3 }\n}\n").unwrap();
    assert_eq!(compact.config_value.tag(), spread.config_value.tag());
    assert_eq!(compact.constants[0].value, spread.constants[0].value);
    assert_eq!(
        format!("{:?}", strip_positions(&compact.config_value)),
        format!("{:?}", strip_positions(&spread.config_value)),
    );
}

fn strip_positions(value: &Value) -> Value {
    match value {
        Value::Int(n) => Value::Int(*n),
        Value::Array(items) => Value::Array(items.iter().map(strip_positions).collect()),
        Value::Dict(pairs) => Value::Dict(
            pairs.iter().map(|(k, v)| (k.clone(), strip_positions(v))).collect(),
        ),
        Value::ConstRef { name, .. } => Value::ConstRef { name: name.clone(), line: 0, column: 0 },
    }
}

#[test]
fn test_syntax_errors() {
    let cases = [
        "",
        "var A 1",
        "root",
        "root [1,]",
        "root [1 2]",
        "root {a:1;}",
        "root {a 1}",
        "root {a:1, b:2}",
        "root |A",
        "root ||",
        "root A",
        "x 1 y 2",
        "var 1 2 root 1",
        "root [1, 2",
        "x 1 var A 2",
        "root 1.5",
    ];

    for input in cases {
        let err = parse(input).expect_err(input);
        assert_eq!(err.kind(), ErrorKind::Syntax, "input {:?} gave {}", input, err);
    }
}

#[test]
fn test_trailing_input_reports_position() {
    let err = parse("x 1\ny 2").unwrap_err();
    match err {
        ConfXmlError::InvalidToken { token, line, column, code, .. } => {
            assert_eq!(token, "name 'y'");
            assert_eq!((line, column), (2, 1));
            assert_eq!(code, Some(205));
        }
        other => panic!("Expected InvalidToken, got {:?}", other),
    }
}

#[test]
fn test_missing_config_is_unexpected_eof() {
    let err = parse("var A 1\n").unwrap_err();
    assert!(matches!(err, ConfXmlError::UnexpectedEof { code: Some(203), .. }));
}

#[test]
fn test_nesting_limit() {
    let deep = format!("root {}{}", "[".repeat(10), "]".repeat(10));

    let ok = Parser::new(&deep).unwrap().with_max_depth(10).parse_document();
    assert!(ok.is_ok());

    let err = Parser::new(&deep)
        .unwrap()
        .with_max_depth(9)
        .parse_document()
        .unwrap_err();
    assert!(matches!(err, ConfXmlError::NestingTooDeep { limit: 9, .. }));
}

#[test]
fn test_default_nesting_limit_stops_runaway_input() {
    let deep = format!("root {}", "[".repeat(100_000));
    let err = parse(&deep).unwrap_err();
    assert!(matches!(err, ConfXmlError::NestingTooDeep { limit: DEFAULT_MAX_DEPTH, .. }));
}

#[test]
fn test_var_is_a_name_outside_declarations() {
    let doc = parse("root {var: 1; x: |var|}").unwrap();
    let keys: Vec<&str> = doc.config_value.as_dict().unwrap().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["var", "x"]);
    assert!(matches!(
        &doc.config_value.as_dict().unwrap()[1].1,
        Value::ConstRef { name, line: 1, column: 19 } if name == "var"
    ));
}

#[test]
fn test_constant_named_var() {
    let doc = parse("var var 1\nroot |var|").unwrap();
    assert_eq!(doc.constants.len(), 1);
    assert_eq!(doc.constants[0].name, "var");
    assert_eq!(doc.config_name, "root");
}

#[test]
fn test_var_without_a_name_is_the_config_entry() {
    let doc = parse("var 5").unwrap();
    assert!(doc.constants.is_empty());
    assert_eq!(doc.config_name, "var");
    assert_eq!(doc.config_value, Value::Int(5));

    let doc = parse("var A 1\nvar [|A|]").unwrap();
    assert_eq!(doc.constants.len(), 1);
    assert_eq!(doc.config_name, "var");
    assert_eq!(doc.config_value.tag(), Some(crate::ast::Tag::Array));
}

#[test]
fn test_declaration_without_config_still_fails() {
    let err = parse("var var 1").unwrap_err();
    assert!(matches!(err, ConfXmlError::UnexpectedEof { code: Some(203), .. }));
}
