/// Output format of the adjacency matrix
///
/// Both the CLI (inbound adapter) and the matrix formatter (outbound adapter)
/// need to understand this choice, so it lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixFormat {
    /// Comma-separated values, opens in any spreadsheet (default)
    #[default]
    Csv,
    /// Markdown table
    Markdown,
}

impl MatrixFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            MatrixFormat::Csv => "csv",
            MatrixFormat::Markdown => "md",
        }
    }
}

impl std::str::FromStr for MatrixFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(MatrixFormat::Csv),
            "markdown" | "md" => Ok(MatrixFormat::Markdown),
            _ => Err(format!(
                "Invalid matrix format: {}. Please specify 'csv' or 'markdown'",
                s
            )),
        }
    }
}

impl std::fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixFormat::Csv => write!(f, "csv"),
            MatrixFormat::Markdown => write!(f, "markdown"),
        }
    }
}
