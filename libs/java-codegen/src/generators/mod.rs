//! Code generators for target languages
//!
//! Each target language has its own module implementing the `Generator` trait.

pub mod java;

use crate::error::Result;
use crate::ir::TypeDescriptor;

/// Trait that all language generators implement.
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate code for the given descriptor sequence.
    fn generate(&self, types: &[TypeDescriptor]) -> Result<Self::Output>;
}

/// Configuration options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Verbatim license/copyright header emitted at the top of every module.
    pub copyright_header: Option<String>,
    /// Product token used in `@since` tags (`@since <prefix> <version>`).
    pub since_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            copyright_header: None,
            since_prefix: "API".to_string(),
        }
    }
}
