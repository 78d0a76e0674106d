//! JSON Schema loader for catalog documents.
//!
//! The schema is embedded at build time so the binary validates catalogs
//! without a repository checkout. Compilation checks that the schema's
//! `schema_version` const agrees with the version the model reads.

use crate::catalog::CATALOG_SCHEMA_VERSION;
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

const CATALOG_SCHEMA: &str = include_str!("../schema/study_catalog.schema.json");
const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Compiled validator plus the schema_version it pins.
pub(crate) struct CompiledSchema {
    pub schema_version: String,
    compiled: JSONSchema,
}

impl CompiledSchema {
    /// Validate `instance`, reporting every violation rather than the first.
    pub fn validate(&self, instance: &Value, label: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| {
                    let path = err.instance_path.to_string();
                    if path.is_empty() {
                        err.to_string()
                    } else {
                        format!("{path}: {err}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{label} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

/// Compile the embedded catalog schema.
pub(crate) fn catalog_schema() -> Result<CompiledSchema> {
    let compiled = compile_schema(CATALOG_SCHEMA, "embedded catalog schema")?;
    if compiled.schema_version != CATALOG_SCHEMA_VERSION {
        bail!(
            "embedded catalog schema pins '{}' but the model reads '{}'",
            compiled.schema_version,
            CATALOG_SCHEMA_VERSION
        );
    }
    Ok(compiled)
}

pub(crate) fn compile_schema(raw: &str, label: &str) -> Result<CompiledSchema> {
    let schema: Value =
        serde_json::from_str(raw).with_context(|| format!("parsing {label}"))?;
    let schema_version = extract_schema_version(&schema, SCHEMA_VERSION_POINTER)
        .ok_or_else(|| anyhow!("{label} missing schema_version const"))?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling {label}: {err}"))?;
    Ok(CompiledSchema {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
