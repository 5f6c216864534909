//! `package.json` reading and framework detection

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::types::{HookError, Result};

/// Manifest file name looked up in the project directory
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency names mapped to display labels, in report order
///
/// Several names may share a label; a label is reported at most once.
pub const KNOWN_FRAMEWORKS: &[(&str, &str)] = &[
    ("react", "React"),
    ("vue", "Vue"),
    ("angular", "Angular"),
    ("@angular/core", "Angular"),
    ("next", "Next.js"),
    ("nuxt", "Nuxt"),
    ("express", "Express"),
    ("fastify", "Fastify"),
    ("nest", "NestJS"),
    ("@nestjs/core", "NestJS"),
];

/// The dependency sections of a `package.json`
///
/// Sections are kept as raw JSON so that odd version values (objects,
/// numbers) or a malformed section do not reject the whole manifest. Every
/// other field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: Option<Value>,
    #[serde(default)]
    pub dev_dependencies: Option<Value>,
}

impl PackageManifest {
    /// Read the manifest from `dir`
    pub async fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(HookError::ManifestNotFound(path));
            }
            Err(e) => return Err(HookError::Io(e)),
        };

        serde_json::from_str(&content).map_err(|source| HookError::InvalidManifest { path, source })
    }

    /// Parse manifest text
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Whether `name` is a key of either dependency section
    ///
    /// A section that is not a JSON object declares nothing.
    pub fn declares(&self, name: &str) -> bool {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .any(|deps| deps.contains_key(name))
    }
}

/// Labels of the known frameworks the manifest declares
pub fn detect_stack(manifest: &PackageManifest) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for (name, label) in KNOWN_FRAMEWORKS {
        if manifest.declares(name) && !labels.contains(label) {
            labels.push(*label);
        }
    }
    labels
}
