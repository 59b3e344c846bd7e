//! Javelin code generator
//!
//! Turns descriptors of an API's data types (structs and wire enums) into
//! ready-to-compile Java binding classes.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Descriptors**: immutable, language-agnostic type model (`ir`),
//!    produced by an external schema parser or loaded from JSON
//! 2. **Resolution**: naming, accessor, and documentation decisions
//!    (`resolve`, `doc`), made before any template runs
//! 3. **Rendering**: skeleton evaluation by a minimal template engine
//!    (`template`, `generators`)
//!
//! Rendering is stateless across types; each descriptor produces one source
//! module or one reported failure.

pub mod doc;
pub mod error;
pub mod generators;
pub mod ir;
pub mod resolve;
pub mod template;
pub mod utils;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use generators::java::{JavaGenerator, JavaOutput};
use generators::GeneratorConfig;
use ir::TypeDescriptor;

pub use error::Error;

/// Main entry point for code generation
pub struct CodeGenerator {
    types: Vec<TypeDescriptor>,
}

impl CodeGenerator {
    /// Create a generator from already-built descriptors.
    pub fn from_types(types: Vec<TypeDescriptor>) -> Self {
        Self { types }
    }

    /// Create a generator from descriptor JSON (a sequence of type
    /// descriptors).
    pub fn from_json_str(json: &str) -> error::Result<Self> {
        let types: Vec<TypeDescriptor> = serde_json::from_str(json)?;
        Ok(Self { types })
    }

    /// Get the descriptor sequence
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Generate code for a specific language
    pub fn generate<G: generators::Generator>(&self, generator: G) -> error::Result<G::Output> {
        generator.generate(&self.types)
    }
}

/// Convenience helper to run the Java generator over a descriptor JSON file
/// and write the modules out.
///
/// Returns the generator output; callers decide how to treat per-type
/// failures.
pub fn generate_java_from_json(
    descriptor_path: &Path,
    output_dir: &Path,
    config: GeneratorConfig,
) -> Result<JavaOutput> {
    let json = fs::read_to_string(descriptor_path)
        .with_context(|| format!("reading descriptors {}", descriptor_path.display()))?;

    let codegen = CodeGenerator::from_json_str(&json).context("parsing descriptors")?;

    let generator = JavaGenerator::new(config);
    let output = codegen
        .generate(generator)
        .context("running Java generator")?;

    utils::write_modules(output_dir, &output.modules)?;

    Ok(output)
}
