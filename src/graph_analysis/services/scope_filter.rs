use crate::graph_analysis::domain::PackageRecord;

/// Maximum length of a scope prefix
const MAX_PREFIX_LENGTH: usize = 255;

/// ScopeFilter - narrows lock-file records to a case-insensitive name prefix
///
/// Packages outside the prefix are dropped, and so are dependency entries of
/// the kept packages that point outside it. An empty prefix keeps everything.
#[derive(Debug, Clone, Default)]
pub struct ScopeFilter {
    prefix: String,
}

impl ScopeFilter {
    /// Creates a filter for `prefix`
    ///
    /// # Errors
    /// Returns an error if the prefix is longer than 255 bytes or contains
    /// whitespace or control characters
    pub fn new(prefix: &str) -> crate::shared::Result<Self> {
        let prefix = prefix.trim();

        if prefix.len() > MAX_PREFIX_LENGTH {
            anyhow::bail!(
                "Scope prefix is too long ({} bytes). Maximum allowed: {} bytes",
                prefix.len(),
                MAX_PREFIX_LENGTH
            );
        }

        if prefix.chars().any(|c| c.is_whitespace() || c.is_control()) {
            anyhow::bail!("Scope prefix '{}' must not contain whitespace", prefix);
        }

        Ok(Self {
            prefix: prefix.to_lowercase(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_unrestricted(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Returns true if `name` starts with the prefix, ignoring case
    pub fn matches(&self, name: &str) -> bool {
        self.prefix.is_empty() || name.to_lowercase().starts_with(&self.prefix)
    }

    /// Keeps in-scope records and strips their out-of-scope dependencies,
    /// preserving record and declaration order
    pub fn apply(&self, records: Vec<PackageRecord>) -> Vec<PackageRecord> {
        if self.is_unrestricted() {
            return records;
        }

        records
            .into_iter()
            .filter(|record| self.matches(&record.name))
            .map(|mut record| {
                record.dependencies.retain(|d| self.matches(&d.name));
                record
            })
            .collect()
    }
}
