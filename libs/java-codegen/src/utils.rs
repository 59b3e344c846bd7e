//! Output writing
//!
//! Rendered binding classes leave the generator as plain text keyed by file
//! name (`<TypeName>.java`); this module puts them on disk for the driver.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Write each rendered module to `<output_dir>/<TypeName>.java`, creating the
/// directory first. Existing files are overwritten: a generation run replaces
/// the whole binding surface, never patches it.
pub fn write_modules(output_dir: &Path, modules: &BTreeMap<String, String>) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    for (filename, contents) in modules {
        let path = output_dir.join(filename);
        fs::write(&path, contents)
            .with_context(|| format!("writing generated module {}", path.display()))?;
        debug!(module = %path.display(), bytes = contents.len(), "wrote module");
    }

    Ok(())
}
