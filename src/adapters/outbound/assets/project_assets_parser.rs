use crate::graph_analysis::domain::{DependencyRecord, PackageRecord};
use crate::ports::outbound::LockfileParseResult;
use crate::shared::error::AppError;
use crate::shared::Result;
use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;

/// The parts of `project.assets.json` the analysis reads
#[derive(Debug, Deserialize)]
struct AssetsFile {
    /// `{framework: {"Name/Version": library}}`, in file order
    targets: IndexMap<String, IndexMap<String, TargetLibrary>>,
}

#[derive(Debug, Deserialize)]
struct TargetLibrary {
    /// `package` or `project`
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    dependencies: IndexMap<String, String>,
}

/// ProjectAssetsParser - turns a NuGet `project.assets.json` into package records
///
/// Every library under `targets` becomes one record; its `dependencies`
/// object becomes the record's dependency list in declaration order.
/// Libraries repeated across target frameworks are emitted once per
/// framework and resolved later by the graph builder's duplicate policy.
pub struct ProjectAssetsParser;

impl ProjectAssetsParser {
    /// Parses lock-file content
    ///
    /// # Arguments
    /// * `content` - Raw JSON text
    /// * `target_framework` - Only read this target (case-insensitive);
    ///   `None` reads every target in file order
    ///
    /// # Errors
    /// Returns an error if the JSON is invalid, lacks `targets`, contains a
    /// library key without a `/`, or the requested target is absent
    /// (`AppError::UnknownTargetFramework`)
    pub fn parse(content: &str, target_framework: Option<&str>) -> Result<LockfileParseResult> {
        let assets: AssetsFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid project.assets.json: {}", e))?;

        let target_frameworks: Vec<String> = assets.targets.keys().cloned().collect();

        let selected: Vec<(&String, &IndexMap<String, TargetLibrary>)> = match target_framework {
            Some(requested) => {
                let target = assets
                    .targets
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(requested))
                    .ok_or_else(|| AppError::UnknownTargetFramework {
                        requested: requested.to_string(),
                        available: Self::describe(&target_frameworks),
                    })?;
                vec![target]
            }
            None => assets.targets.iter().collect(),
        };

        let mut records = Vec::new();
        for (framework, libraries) in selected {
            debug!("Reading {} libraries of target {}", libraries.len(), framework);
            for (key, library) in libraries {
                records.push(Self::to_record(framework, key, library)?);
            }
        }

        Ok(LockfileParseResult {
            records,
            target_frameworks,
        })
    }

    fn to_record(framework: &str, key: &str, library: &TargetLibrary) -> Result<PackageRecord> {
        let (name, version) = key.split_once('/').ok_or_else(|| {
            anyhow::anyhow!(
                "Library '{}' in target '{}' is not of the form Name/Version",
                key,
                framework
            )
        })?;

        trace!(
            "{} {} ({}) with {} dependencies",
            name,
            version,
            library.kind.as_deref().unwrap_or("package"),
            library.dependencies.len()
        );

        Ok(PackageRecord {
            name: name.to_string(),
            version: version.to_string(),
            dependencies: library
                .dependencies
                .iter()
                .map(|(name, version)| DependencyRecord {
                    name: name.clone(),
                    version: version.clone(),
                })
                .collect(),
        })
    }

    fn describe(target_frameworks: &[String]) -> String {
        if target_frameworks.is_empty() {
            "(none)".to_string()
        } else {
            target_frameworks.join(", ")
        }
    }
}
