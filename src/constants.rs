use indexmap::IndexMap;
use tracing::trace;

use crate::ast::Value;
use crate::ConfXmlError;

#[derive(Debug, Clone)]
struct Constant {
    value: Value,
    depth: usize, // cached `value.depth()`
}

/// Resolved constants of one compile, in declaration order.
///
/// The table only grows: a name is inserted once and never replaced or
/// removed, so references handed out by [`ConstantTable::lookup`] always see
/// the value that was declared.
#[derive(Debug, Default, Clone)]
pub struct ConstantTable {
    values: IndexMap<String, Constant>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resolved value under a fresh name.
    ///
    /// `line`/`column` locate the declaration and are only used for errors.
    pub fn declare(
        &mut self,
        name: &str,
        value: Value,
        line: usize,
        column: usize,
    ) -> Result<(), ConfXmlError> {
        self.ensure_undeclared(name, line, column)?;

        if let Some(inner) = value.first_const_ref() {
            return Err(ConfXmlError::Unresolved {
                name: inner.to_string(),
                hint: Some(format!("Resolve '{}' before declaring it", name)),
                code: Some(303),
            });
        }

        let depth = value.depth();
        trace!(constant = name, depth, "declared constant");
        self.values.insert(name.to_string(), Constant { value, depth });
        Ok(())
    }

    /// Fails with `DuplicateConstant` if `name` is already in the table.
    pub fn ensure_undeclared(&self, name: &str, line: usize, column: usize) -> Result<(), ConfXmlError> {
        if self.values.contains_key(name) {
            return Err(ConfXmlError::DuplicateConstant {
                name: name.to_string(),
                line,
                column,
                hint: Some("Each constant can only be declared once".into()),
                code: Some(301),
            });
        }
        Ok(())
    }

    /// `line`/`column` locate the reference and are only used for errors.
    pub fn lookup(&self, name: &str, line: usize, column: usize) -> Result<&Value, ConfXmlError> {
        self.lookup_with_depth(name, line, column).map(|(value, _)| value)
    }

    /// Like [`ConstantTable::lookup`], also returning the value's nesting depth.
    pub fn lookup_with_depth(
        &self,
        name: &str,
        line: usize,
        column: usize,
    ) -> Result<(&Value, usize), ConfXmlError> {
        self.values
            .get(name)
            .map(|c| (&c.value, c.depth))
            .ok_or_else(|| ConfXmlError::UnknownConstant {
                name: name.to_string(),
                line,
                column,
                hint: Some("Constants must be declared with 'var' before they are used".into()),
                code: Some(302),
            })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).map(|c| &c.value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
