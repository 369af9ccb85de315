//! Storage Class Manifests
//!
//! Reads resolver input from disk. A document with `kind: StorageClass` is
//! decoded as a Kubernetes `StorageClass` and its `parameters` are used;
//! any other document must be a flat string-to-string map. JSON input works
//! as well since YAML is a superset of it.

use crate::error::{Error, Result};
use k8s_openapi::api::storage::v1::StorageClass;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const STORAGE_CLASS_KIND: &str = "StorageClass";

/// Extract storage class parameters from a manifest document
pub fn parameters_from_str(content: &str) -> Result<BTreeMap<String, String>> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content)?;
    if doc.is_null() {
        return Err(Error::Manifest("empty document".to_string()));
    }

    match doc.get("kind").and_then(|k| k.as_str()) {
        Some(STORAGE_CLASS_KIND) => {
            let class: StorageClass = serde_yaml::from_value(doc)?;
            debug!(
                name = class.metadata.name.as_deref().unwrap_or(""),
                provisioner = %class.provisioner,
                "Read StorageClass manifest"
            );
            Ok(class.parameters.unwrap_or_default())
        }
        Some(kind) => Err(Error::Manifest(format!(
            "expected kind {}, found {}",
            STORAGE_CLASS_KIND, kind
        ))),
        None => Ok(serde_yaml::from_value(doc)?),
    }
}

/// Extract storage class parameters from a manifest file
pub fn parameters_from_path(path: impl AsRef<Path>) -> Result<BTreeMap<String, String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parameters_from_str(&content)
        .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))
}
