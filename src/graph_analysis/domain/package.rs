use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// NewType wrapper for a package name
///
/// NuGet package ids are case-insensitive, so equality and hashing use a
/// lowercased key while `as_str()` keeps the spelling from the lock file.
#[derive(Debug, Clone)]
pub struct PackageName {
    display: String,
    key: String,
}

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into();
        let key = display.to_lowercase();
        Self { display, key }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Case-folded form used for lookups
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if this name equals `other`, ignoring case
    pub fn matches(&self, other: &str) -> bool {
        self.key == other.to_lowercase()
    }

    /// Returns the first `segments` dot-separated parts joined by '.'
    ///
    /// `Contoso.Data.Sql.Abstractions` with 3 segments gives `Contoso.Data.Sql`.
    pub fn root(&self, segments: usize) -> String {
        self.display
            .split('.')
            .take(segments)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn segment_count(&self) -> usize {
        self.display.split('.').count()
    }
}

impl PartialEq for PackageName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PackageName {}

impl Hash for PackageName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// NewType wrapper for an opaque version label
///
/// Versions are never parsed as semver. The only structure looked at is the
/// leading dotted segment, used as a coarse major-version drift signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading segment of the version, ignoring range brackets
    ///
    /// `"6.0.1"` gives `"6"`; the NuGet range `"[6.0.1, )"` also gives `"6"`.
    pub fn leading_segment(&self) -> &str {
        self.0
            .trim_start_matches(|c: char| c == '[' || c == '(' || c.is_whitespace())
            .split(|c: char| c == '.' || c == ',' || c == ')' || c == ']' || c.is_whitespace())
            .next()
            .unwrap_or("")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A direct dependency as declared in a package's own manifest entry
///
/// `version` is what the consumer asked for, which can differ from the
/// version the referenced package resolved to elsewhere in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    name: PackageName,
    version: Version,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: PackageName::new(name),
            version: Version::new(version),
        }
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

/// Inverse edge recorded on the package being depended on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedBy {
    consumer_name: PackageName,
    consumer_declared_version: Version,
    producer_version: Version,
}

impl UsedBy {
    pub fn new(
        consumer_name: PackageName,
        consumer_declared_version: Version,
        producer_version: Version,
    ) -> Self {
        Self {
            consumer_name,
            consumer_declared_version,
            producer_version,
        }
    }

    /// The package that declares the dependency
    pub fn consumer_name(&self) -> &PackageName {
        &self.consumer_name
    }

    /// The version string the consumer's dependency entry named
    pub fn consumer_declared_version(&self) -> &Version {
        &self.consumer_declared_version
    }

    /// The version of the depended-on package at index time
    pub fn producer_version(&self) -> &Version {
        &self.producer_version
    }
}

/// Package node of the dependency graph
///
/// Dependencies are only ever removed (by the edge reducer) and usages only
/// ever appended (by the usage indexer); both mutators are crate-private.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: PackageName,
    version: Version,
    dependencies: Vec<Dependency>,
    used_by: Vec<UsedBy>,
}

impl Package {
    pub(crate) fn new(name: PackageName, version: Version, dependencies: Vec<Dependency>) -> Self {
        Self {
            name,
            version,
            dependencies,
            used_by: Vec::new(),
        }
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn used_by(&self) -> &[UsedBy] {
        &self.used_by
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Number of recorded consumers; always the live length of `used_by()`
    pub fn usage_count(&self) -> usize {
        self.used_by.len()
    }

    /// Returns true if one of the current dependency entries names `name`
    pub fn depends_on(&self, name: &PackageName) -> bool {
        self.dependencies.iter().any(|d| d.name() == name)
    }

    pub(crate) fn record_usage(&mut self, usage: UsedBy) {
        self.used_by.push(usage);
    }

    pub(crate) fn clear_usages(&mut self) {
        self.used_by.clear();
    }

    /// Keeps the dependencies for which `keep` returns true, preserving order,
    /// and returns the removed entries.
    pub(crate) fn retain_dependencies<F>(&mut self, mut keep: F) -> Vec<Dependency>
    where
        F: FnMut(&Dependency) -> bool,
    {
        let (kept, removed): (Vec<_>, Vec<_>) =
            self.dependencies.drain(..).partition(|d| keep(d));
        self.dependencies = kept;
        removed
    }
}

/// Input record for the graph builder: one resolved package and its declared dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.push(DependencyRecord {
            name: name.into(),
            version: version.into(),
        });
        self
    }
}

/// A (name, declared version) pair inside a [`PackageRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_package_name_case_insensitive_equality() {
        let a = PackageName::new("Newtonsoft.Json");
        let b = PackageName::new("newtonsoft.json");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Newtonsoft.Json");
        assert_eq!(a.key(), "newtonsoft.json");
    }

    #[test]
    fn test_package_name_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(PackageName::new("Contoso.Core"));
        assert!(set.contains(&PackageName::new("CONTOSO.CORE")));
    }

    #[test]
    fn test_package_name_matches() {
        let name = PackageName::new("Contoso.Core");
        assert!(name.matches("contoso.core"));
        assert!(!name.matches("contoso.core.tests"));
    }

    #[test]
    fn test_package_name_root() {
        let name = PackageName::new("Contoso.Data.Sql.Abstractions");
        assert_eq!(name.root(3), "Contoso.Data.Sql");
        assert_eq!(name.segment_count(), 4);
        assert_eq!(PackageName::new("Serilog").root(3), "Serilog");
    }

    #[test]
    fn test_version_leading_segment() {
        assert_eq!(Version::new("6.0.1").leading_segment(), "6");
        assert_eq!(Version::new("[6.0.1, )").leading_segment(), "6");
        assert_eq!(Version::new("(4.5, 5.0]").leading_segment(), "4");
        assert_eq!(Version::new("12").leading_segment(), "12");
        assert_eq!(Version::new("").leading_segment(), "");
    }

    #[test]
    fn test_package_usage_count_tracks_used_by() {
        let mut package = Package::new(
            PackageName::new("Contoso.Core"),
            Version::new("1.0.0"),
            vec![],
        );
        assert_eq!(package.usage_count(), 0);

        package.record_usage(UsedBy::new(
            PackageName::new("Contoso.Web"),
            Version::new("1.0.0"),
            Version::new("1.0.0"),
        ));
        assert_eq!(package.usage_count(), 1);
        assert_eq!(package.usage_count(), package.used_by().len());

        package.clear_usages();
        assert_eq!(package.usage_count(), 0);
    }

    #[test]
    fn test_retain_dependencies_preserves_order() {
        let mut package = Package::new(
            PackageName::new("A"),
            Version::new("1.0.0"),
            vec![
                Dependency::new("B", "1.0.0"),
                Dependency::new("C", "1.0.0"),
                Dependency::new("D", "1.0.0"),
            ],
        );

        let removed = package.retain_dependencies(|d| d.name().as_str() != "C");

        assert_eq!(removed, vec![Dependency::new("C", "1.0.0")]);
        let names: Vec<&str> = package
            .dependencies()
            .iter()
            .map(|d| d.name().as_str())
            .collect();
        assert_eq!(names, vec!["B", "D"]);
    }

    #[test]
    fn test_package_depends_on_ignores_case() {
        let package = Package::new(
            PackageName::new("A"),
            Version::new("1.0.0"),
            vec![Dependency::new("Contoso.Core", "1.0.0")],
        );
        assert!(package.depends_on(&PackageName::new("contoso.core")));
        assert!(!package.depends_on(&PackageName::new("Contoso.Web")));
    }

    #[test]
    fn test_package_record_builder() {
        let record = PackageRecord::new("A", "1.0.0")
            .with_dependency("B", "2.0.0")
            .with_dependency("C", "[3.0.0, )");
        assert_eq!(record.dependencies.len(), 2);
        assert_eq!(record.dependencies[1].version, "[3.0.0, )");
    }
}
