//! Schema artifacts in the output directory.

use super::{Schema, SchemaError};
use crate::utils::fs::write_if_changed;
use std::path::Path;

pub const SCHEMA_JSON: &str = "schema.json";
pub const SCHEMA_TS: &str = "schema.ts";

/// Ignore-everything marker for generated directories.
pub(crate) const GITIGNORE: &str = "*";

const SCHEMA_MODULE: &str = "export const schema = {schema} as const;

declare module \"next-globe-gen\" {
\tinterface SchemaRegister {
\t\tschema: typeof schema
\t}
}
";

/// Typed module registering the schema with the runtime package.
pub fn render_schema_module(json: &str) -> String {
    SCHEMA_MODULE.replace("{schema}", json)
}

/// Write `schema.json`, `schema.ts` and `.gitignore` into `out_dir`.
///
/// Returns `true` if any file content changed.
pub fn write_schema(out_dir: &Path, schema: &Schema) -> Result<bool, SchemaError> {
    let json = schema.to_json()?;
    let files = [
        (".gitignore", GITIGNORE.to_string()),
        (SCHEMA_JSON, json.clone()),
        (SCHEMA_TS, render_schema_module(&json)),
    ];

    let mut changed = false;
    for (name, content) in files {
        let path = out_dir.join(name);
        changed |= write_if_changed(&path, content.as_bytes())
            .map_err(|err| SchemaError::Io(path.clone(), err))?;
    }
    Ok(changed)
}
