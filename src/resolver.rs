use tracing::debug;

use crate::ast::{ConfigEntry, Document, Value};
use crate::constants::ConstantTable;
use crate::{CompileOptions, ConfXmlError};

/// Substitutes every constant reference in `value` with the stored constant.
///
/// Containers are walked left to right and keep their order and keys. The
/// table is only read. A reference whose value would push the result past
/// `options.max_depth` levels of nesting fails with `NestingTooDeep`.
pub fn resolve(
    value: &Value,
    table: &ConstantTable,
    options: &CompileOptions,
) -> Result<Value, ConfXmlError> {
    resolve_at(value, table, 0, options.max_depth)
}

// `enclosing` counts the arrays/dicts around `value` in the resolved tree.
fn resolve_at(
    value: &Value,
    table: &ConstantTable,
    enclosing: usize,
    max_depth: usize,
) -> Result<Value, ConfXmlError> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_at(item, table, enclosing + 1, max_depth))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Dict(pairs) => pairs
            .iter()
            .map(|(key, v)| resolve_at(v, table, enclosing + 1, max_depth).map(|v| (key.clone(), v)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Dict),
        Value::ConstRef { name, line, column } => {
            let (found, depth) = table.lookup_with_depth(name, *line, *column)?;
            if enclosing + depth > max_depth {
                return Err(ConfXmlError::NestingTooDeep {
                    limit: max_depth,
                    line: *line,
                    column: *column,
                    hint: Some(format!(
                        "'{}' is {} levels deep and is used {} levels down",
                        name, depth, enclosing
                    )),
                    code: Some(304),
                });
            }
            Ok(found.clone())
        }
    }
}

/// Builds the constant table in declaration order, then resolves the config
/// entry against it.
///
/// A declaration may only see constants declared strictly before it. A
/// duplicate name is reported before its value is looked at.
pub fn resolve_document(
    doc: &Document,
    options: &CompileOptions,
) -> Result<(ConstantTable, ConfigEntry), ConfXmlError> {
    let mut table = ConstantTable::new();

    for decl in &doc.constants {
        table.ensure_undeclared(&decl.name, decl.line, decl.column)?;
        let value = resolve(&decl.value, &table, options)?;
        table.declare(&decl.name, value, decl.line, decl.column)?;
    }

    debug!(constants = table.len(), config = %doc.config_name, "resolved constants");

    let value = resolve(&doc.config_value, &table, options)?;
    let entry = ConfigEntry {
        name: doc.config_name.clone(),
        value,
    };
    Ok((table, entry))
}
