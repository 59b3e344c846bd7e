//! Java generator
//!
//! Renders each descriptor independently; a failing type is reported and
//! skipped so the rest of the run still completes. Partial output for a failed
//! type is never kept.

pub mod enums;
pub mod skeletons;
pub mod structs;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::generators::{Generator, GeneratorConfig};
use crate::ir::TypeDescriptor;

/// Output of the Java generator
#[derive(Debug)]
pub struct JavaOutput {
    /// Generated modules, file name (`<TypeName>.java`) to source text.
    pub modules: BTreeMap<String, String>,
    /// Types that failed to render, in input order.
    pub failures: Vec<TypeFailure>,
}

#[derive(Debug)]
pub struct TypeFailure {
    pub type_name: String,
    pub error: Error,
}

/// Java code generator
pub struct JavaGenerator {
    config: GeneratorConfig,
}

impl JavaGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }

    fn render_type(&self, type_def: &TypeDescriptor) -> Result<String> {
        match type_def {
            TypeDescriptor::Struct(desc) => structs::render(desc, &self.config),
            TypeDescriptor::Enum(desc) => enums::render(desc, &self.config),
        }
    }
}

impl Generator for JavaGenerator {
    type Output = JavaOutput;

    fn generate(&self, types: &[TypeDescriptor]) -> Result<JavaOutput> {
        let mut modules = BTreeMap::new();
        let mut failures = Vec::new();

        for type_def in types {
            match self.render_type(type_def) {
                Ok(text) => {
                    debug!(name = type_def.name(), "rendered type");
                    modules.insert(format!("{}.java", type_def.name()), text);
                }
                Err(error) => {
                    warn!(name = type_def.name(), %error, "skipping type");
                    failures.push(TypeFailure {
                        type_name: type_def.name().to_string(),
                        error,
                    });
                }
            }
        }

        Ok(JavaOutput { modules, failures })
    }
}
