use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Shape of a resolved value, written as the `type` attribute in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Int,
    Array,
    Dict,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Int => "int",
            Tag::Array => "array",
            Tag::Dict => "dict",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Array(Vec<Value>),
    Dict(Vec<(String, Value)>), // keys may repeat, order is kept
    ConstRef {
        name: String,
        line: usize,
        column: usize,
    },
}

impl Value {
    /// `None` for a constant reference, which has no shape until resolved.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Value::Int(_) => Some(Tag::Int),
            Value::Array(_) => Some(Tag::Array),
            Value::Dict(_) => Some(Tag::Dict),
            Value::ConstRef { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.first_const_ref().is_none()
    }

    /// Name of the first constant reference in source order, if any.
    pub fn first_const_ref(&self) -> Option<&str> {
        match self {
            Value::Int(_) => None,
            Value::Array(items) => items.iter().find_map(Value::first_const_ref),
            Value::Dict(pairs) => pairs.iter().find_map(|(_, v)| v.first_const_ref()),
            Value::ConstRef { name, .. } => Some(name),
        }
    }

    pub fn as_dict(&self) -> Option<&Vec<(String, Value)>> {
        if let Value::Dict(pairs) = self {
            Some(pairs)
        } else {
            None
        }
    }

    /// Number of nested arrays/dicts, `0` for an integer or reference.
    pub fn depth(&self) -> usize {
        match self {
            Value::Int(_) | Value::ConstRef { .. } => 0,
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Dict(pairs) => 1 + pairs.iter().map(|(_, v)| v.depth()).max().unwrap_or(0),
        }
    }
}

// {"type": "int", "value": 5}; dicts become arrays of {"key", ...} entries so
// repeated keys survive.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            key: &'a str,
            #[serde(flatten)]
            value: &'a Value,
        }

        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Value::Int(n) => {
                map.serialize_entry("type", &Tag::Int)?;
                map.serialize_entry("value", n)?;
            }
            Value::Array(items) => {
                map.serialize_entry("type", &Tag::Array)?;
                map.serialize_entry("value", items)?;
            }
            Value::Dict(pairs) => {
                let entries: Vec<Entry<'_>> = pairs
                    .iter()
                    .map(|(key, value)| Entry { key, value })
                    .collect();
                map.serialize_entry("type", &Tag::Dict)?;
                map.serialize_entry("value", &entries)?;
            }
            Value::ConstRef { name, .. } => {
                map.serialize_entry("ref", name)?;
            }
        }
        map.end()
    }
}

/// `var NAME value`, with the position of NAME.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub value: Value,
    pub line: usize,
    pub column: usize,
}

/// Parsed source: constants in declaration order, then the single config entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub constants: Vec<ConstDecl>,
    pub config_name: String,
    pub config_value: Value,
}

/// The resolved root of the output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: Value,
}
