pub mod ast;
pub mod constants;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod resolver;

use std::fmt;

use tracing::debug;

pub use ast::{ConfigEntry, Document, Tag, Value};
pub use constants::ConstantTable;
pub use error::{ConfXmlError, ErrorKind};

/// Knobs for a single compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Deepest allowed nesting of arrays and dicts.
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: parser::DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Pipeline stage of a compile, as reported in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    Resolving,
    Emitting,
    Done,
    Failed(ErrorKind),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parsing => f.write_str("parsing"),
            Stage::Resolving => f.write_str("resolving"),
            Stage::Emitting => f.write_str("emitting"),
            Stage::Done => f.write_str("done"),
            Stage::Failed(kind) => write!(f, "failed ({})", kind),
        }
    }
}

/// Compile config source text to a single-line XML string.
///
/// ```
/// let xml = confxml::compile("var A 1\nroot {a: |A|}").unwrap();
/// assert_eq!(xml, r#"<root><a type="int">1</a></root>"#);
/// ```
pub fn compile(input: &str) -> Result<String, ConfXmlError> {
    compile_with(input, &CompileOptions::default())
}

/// Parse, resolve and emit. The first failing stage ends the compile and
/// nothing is returned but its error.
pub fn compile_with(input: &str, options: &CompileOptions) -> Result<String, ConfXmlError> {
    let result = run_stages(input, options);
    match &result {
        Ok(_) => debug!(stage = %Stage::Done, "compile finished"),
        Err(e) => debug!(stage = %Stage::Failed(e.kind()), error = %e, "compile failed"),
    }
    result
}

fn run_stages(input: &str, options: &CompileOptions) -> Result<String, ConfXmlError> {
    let entry = resolve_with(input, options)?;

    debug!(stage = %Stage::Emitting, root = %entry.name);
    export::emit(&entry)
}

/// Parse and resolve without emitting, e.g. for JSON export.
pub fn resolve_with(input: &str, options: &CompileOptions) -> Result<ConfigEntry, ConfXmlError> {
    debug!(stage = %Stage::Parsing, bytes = input.len());
    let doc = parser::Parser::new(input)?
        .with_max_depth(options.max_depth)
        .parse_document()?;

    debug!(stage = %Stage::Resolving, constants = doc.constants.len());
    resolver::resolve_document(&doc, options).map(|(_, entry)| entry)
}

/// [`compile`] followed by [`pretty::pretty_print_xml`].
pub fn compile_pretty(input: &str) -> Result<String, ConfXmlError> {
    let xml = compile(input)?;
    pretty::pretty_print_xml(&xml)
}
