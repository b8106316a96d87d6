//! Code generators for the supported view frameworks.

mod react;
mod vue;

pub use react::ReactGenerator;
pub use vue::VueGenerator;

use crate::error::CodegenError;
use orion_core::Node;
use std::fmt;
use std::str::FromStr;

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target dialect.
    fn dialect(&self) -> Dialect;

    /// Emit `node` and its subtree, indented `level` units.
    fn generate_fragment(&self, node: &Node, level: usize) -> String;

    /// Emit a complete, self-contained document for `tree`.
    fn generate_document(&self, tree: &Node) -> String;
}

/// Output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// A React function component returning JSX.
    React,
    /// A Vue single-file component.
    Vue,
}

impl Dialect {
    pub const ALL: &'static [Dialect] = &[Dialect::React, Dialect::Vue];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::React => "react",
            Dialect::Vue => "vue",
        }
    }

    /// Conventional file extension of an exported document.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Dialect::React => "jsx",
            Dialect::Vue => "vue",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react" | "jsx" => Ok(Dialect::React),
            "vue" | "sfc" => Ok(Dialect::Vue),
            _ => Err(CodegenError::UnknownDialect(s.to_string())),
        }
    }
}

/// Options for document generation.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Name of the exported React component.
    pub component_name: String,
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            component_name: "ExportedComponent".to_string(),
            indent_width: 2,
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

/// Generator for `dialect`.
pub fn generator(dialect: Dialect, options: EmitOptions) -> Box<dyn CodeGenerator> {
    match dialect {
        Dialect::React => Box::new(ReactGenerator::new(options)),
        Dialect::Vue => Box::new(VueGenerator::new(options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        assert_eq!("React".parse::<Dialect>().unwrap(), Dialect::React);
        assert_eq!("sfc".parse::<Dialect>().unwrap(), Dialect::Vue);
        assert!(matches!("svelte".parse::<Dialect>(), Err(CodegenError::UnknownDialect(_))));
        assert_eq!(Dialect::Vue.file_extension(), "vue");
    }

    #[test]
    fn test_generator_dispatch() {
        for dialect in Dialect::ALL {
            assert_eq!(generator(*dialect, EmitOptions::default()).dialect(), *dialect);
        }
    }
}
