use super::{Dependency, Package, PackageName};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// DependencyGraph aggregate: packages keyed by case-folded name
///
/// Iteration follows insertion order, so every pass over the graph (indexing,
/// reduction, rendering) is reproducible for the same input records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    packages: IndexMap<String, Package>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in insertion order
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Looks a package up by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Position of a package in insertion order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.packages.get_index_of(&name.to_lowercase())
    }

    pub fn get_index(&self, index: usize) -> Option<&Package> {
        self.packages.get_index(index).map(|(_, p)| p)
    }

    /// Package a dependency entry points at, if it is a node of this graph
    pub fn resolve(&self, dependency: &Dependency) -> Option<&Package> {
        self.packages.get(dependency.name().key())
    }

    /// Like [`DependencyGraph::resolve`], also returning the package's position
    pub fn resolve_indexed(&self, dependency: &Dependency) -> Option<(usize, &Package)> {
        self.packages
            .get_full(dependency.name().key())
            .map(|(index, _, package)| (index, package))
    }

    /// Package names in insertion order, as spelled in the lock file
    pub fn package_names(&self) -> Vec<&str> {
        self.packages.values().map(|p| p.name().as_str()).collect()
    }

    /// Returns true if `consumer` currently has a dependency entry naming `producer`
    pub fn depends_on(&self, consumer: &str, producer: &str) -> bool {
        let producer = PackageName::new(producer);
        self.get(consumer)
            .is_some_and(|package| package.depends_on(&producer))
    }

    /// Total number of current dependency entries
    pub fn edge_count(&self) -> usize {
        self.packages.values().map(Package::dependency_count).sum()
    }

    /// Case-folded names reachable from `name` by following dependency entries
    ///
    /// Dangling names (dependencies without a node) are included but not
    /// expanded. The start package only appears if it sits on a cycle.
    pub fn closure(&self, name: &str) -> BTreeSet<String> {
        let mut reachable = BTreeSet::new();
        let Some(start) = self.get(name) else {
            return reachable;
        };

        let mut stack: Vec<&Package> = vec![start];
        while let Some(current) = stack.pop() {
            for dependency in current.dependencies() {
                if reachable.insert(dependency.name().key().to_string()) {
                    if let Some(next) = self.resolve(dependency) {
                        stack.push(next);
                    }
                }
            }
        }

        reachable
    }

    pub(crate) fn entry_key(package: &Package) -> String {
        package.name().key().to_string()
    }

    pub(crate) fn packages_mut(&mut self) -> &mut IndexMap<String, Package> {
        &mut self.packages
    }

    pub(crate) fn get_index_mut(&mut self, index: usize) -> Option<&mut Package> {
        self.packages.get_index_mut(index).map(|(_, p)| p)
    }
}
