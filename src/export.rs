// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{ConfigEntry, Value};
use crate::ConfXmlError;

static ELEMENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("element name pattern"));

/// Render a resolved config entry as a single-line XML string.
///
/// The entry name becomes the root element and the value's inner markup
/// becomes its content:
/// - dict pairs → `<key type="TAG">BODY</key>`, in source order, duplicate
///   keys kept as repeated siblings
/// - array items → `<element type="TAG">BODY</element>`
/// - integers → their decimal form, so `x 5` renders as `<x>5</x>`
///
/// No XML declaration is written; see [`crate::pretty::pretty_print_xml`].
///
/// # Examples
/// ```
/// use confxml::{ConfigEntry, Value, export::emit};
///
/// let entry = ConfigEntry {
///     name: "root".into(),
///     value: Value::Dict(vec![("a".into(), Value::Int(1))]),
/// };
/// assert_eq!(emit(&entry).unwrap(), r#"<root><a type="int">1</a></root>"#);
/// ```
///
/// # Errors
/// `InvalidName` if a name could not be an XML element name, `Unresolved`
/// if the value still contains a constant reference.
pub fn emit(entry: &ConfigEntry) -> Result<String, ConfXmlError> {
    check_name(&entry.name)?;

    let mut out = format!("<{}>", entry.name);
    write_body(&mut out, &entry.value)?;
    out.push_str(&format!("</{}>", entry.name));
    Ok(out)
}

fn check_name(name: &str) -> Result<(), ConfXmlError> {
    if ELEMENT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ConfXmlError::InvalidName {
            name: name.to_string(),
            hint: Some("Names start with a letter followed by letters, digits or '_'".into()),
            code: Some(401),
        })
    }
}

fn write_body(out: &mut String, value: &Value) -> Result<(), ConfXmlError> {
    match value {
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Array(items) => {
            for item in items {
                write_element(out, "element", item)?;
            }
        }
        Value::Dict(pairs) => {
            for (key, item) in pairs {
                check_name(key)?;
                write_element(out, key, item)?;
            }
        }
        Value::ConstRef { name, .. } => {
            return Err(ConfXmlError::Unresolved {
                name: name.clone(),
                hint: Some("Resolve the document before emitting it".into()),
                code: Some(402),
            });
        }
    }
    Ok(())
}

fn write_element(out: &mut String, name: &str, value: &Value) -> Result<(), ConfXmlError> {
    let tag = value.tag().ok_or_else(|| ConfXmlError::Unresolved {
        name: value.first_const_ref().unwrap_or_default().to_string(),
        hint: Some("Resolve the document before emitting it".into()),
        code: Some(402),
    })?;

    out.push_str(&format!("<{} type=\"{}\">", name, tag.as_str()));
    write_body(out, value)?;
    out.push_str(&format!("</{}>", name));
    Ok(())
}

/// Export a resolved config entry to pretty JSON.
///
/// Every value is written as `{"type": TAG, "value": ...}`; dict values are
/// arrays of `{"key": ..., "type": ..., "value": ...}` entries so that
/// ordering and repeated keys survive.
pub fn export_entry_to_json(entry: &ConfigEntry) -> Result<String, ConfXmlError> {
    if let Some(name) = entry.value.first_const_ref() {
        return Err(ConfXmlError::Unresolved {
            name: name.to_string(),
            hint: Some("Resolve the document before exporting it".into()),
            code: Some(402),
        });
    }

    serde_json::to_string_pretty(entry).map_err(|e| ConfXmlError::IoError {
        message: format!("Failed to serialize JSON: {}", e),
        hint: None,
        code: Some(501),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: Value) -> ConfigEntry {
        ConfigEntry { name: name.into(), value }
    }

    #[test]
    fn test_emit_nested_array_in_dict() {
        let e = entry(
            "root",
            Value::Dict(vec![(
                "a".into(),
                Value::Array(vec![Value::Int(1), Value::Int(2)]),
            )]),
        );
        assert_eq!(
            emit(&e).unwrap(),
            r#"<root><a type="array"><element type="int">1</element><element type="int">2</element></a></root>"#
        );
    }

    #[test]
    fn test_emit_scalar_root_keeps_the_number() {
        assert_eq!(emit(&entry("x", Value::Int(5))).unwrap(), "<x>5</x>");
        assert_eq!(emit(&entry("x", Value::Int(-12))).unwrap(), "<x>-12</x>");
    }

    #[test]
    fn test_emit_array_root_has_no_wrapper() {
        let e = entry("list", Value::Array(vec![Value::Int(1), Value::Dict(vec![])]));
        assert_eq!(
            emit(&e).unwrap(),
            r#"<list><element type="int">1</element><element type="dict"></element></list>"#
        );
    }

    #[test]
    fn test_emit_empty_containers() {
        assert_eq!(emit(&entry("r", Value::Dict(vec![]))).unwrap(), "<r></r>");
        assert_eq!(emit(&entry("r", Value::Array(vec![]))).unwrap(), "<r></r>");
    }

    #[test]
    fn test_emit_duplicate_keys_as_siblings() {
        let e = entry(
            "root",
            Value::Dict(vec![("a".into(), Value::Int(1)), ("a".into(), Value::Int(2))]),
        );
        assert_eq!(
            emit(&e).unwrap(),
            r#"<root><a type="int">1</a><a type="int">2</a></root>"#
        );
    }

    #[test]
    fn test_emit_extreme_integers_verbatim() {
        let e = entry("r", Value::Array(vec![Value::Int(i64::MIN), Value::Int(i64::MAX), Value::Int(0)]));
        assert_eq!(
            emit(&e).unwrap(),
            format!(
                r#"<r><element type="int">{}</element><element type="int">{}</element><element type="int">0</element></r>"#,
                i64::MIN,
                i64::MAX
            )
        );
    }

    #[test]
    fn test_emit_rejects_unresolved_reference() {
        let e = entry(
            "root",
            Value::Dict(vec![(
                "a".into(),
                Value::ConstRef { name: "A".into(), line: 1, column: 10 },
            )]),
        );
        let err = emit(&e).unwrap_err();
        assert!(matches!(err, ConfXmlError::Unresolved { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_emit_rejects_invalid_names() {
        let err = emit(&entry("1bad", Value::Int(1))).unwrap_err();
        assert!(matches!(err, ConfXmlError::InvalidName { .. }));

        let e = entry("ok", Value::Dict(vec![("a b".into(), Value::Int(1))]));
        assert!(matches!(emit(&e).unwrap_err(), ConfXmlError::InvalidName { ref name, .. } if name == "a b"));
    }

    #[test]
    fn test_export_json_keeps_order_and_duplicates() {
        let e = entry(
            "root",
            Value::Dict(vec![
                ("b".into(), Value::Int(1)),
                ("a".into(), Value::Array(vec![Value::Int(2)])),
                ("b".into(), Value::Int(3)),
            ]),
        );

        let json_output = export_entry_to_json(&e).unwrap();
        println!("--- Exported JSON ---\n{}", json_output);

        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();
        assert_eq!(v["name"], "root");
        assert_eq!(v["value"]["type"], "dict");
        let entries = v["value"]["value"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["key"], "b");
        assert_eq!(entries[0]["type"], "int");
        assert_eq!(entries[0]["value"], 1);
        assert_eq!(entries[1]["type"], "array");
        assert_eq!(entries[1]["value"][0]["value"], 2);
        assert_eq!(entries[2]["value"], 3);
    }

    #[test]
    fn test_export_json_rejects_unresolved() {
        let e = entry("root", Value::ConstRef { name: "A".into(), line: 1, column: 7 });
        assert!(export_entry_to_json(&e).is_err());
    }
}
