use crate::application::dto::MatrixFormat;
use crate::application::read_models::GraphReadModel;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// Text written where the row package depends on the column package
const DEPENDENCY_CELL: &str = "dependency";

/// Header of the first column
const CORNER_LABEL: &str = "Package";

/// MatrixFormatter adapter rendering an adjacency matrix
///
/// Rows and columns both list the packages in graph order. A cell holds
/// `dependency` when the row package has a current dependency entry naming
/// the column package.
pub struct MatrixFormatter {
    format: MatrixFormat,
}

impl MatrixFormatter {
    pub fn new(format: MatrixFormat) -> Self {
        Self { format }
    }

    /// Builds the matrix as rows of cells, header row first
    fn rows(model: &GraphReadModel) -> Vec<Vec<&str>> {
        let size = model.nodes.len();
        let mut cells = vec![vec![""; size]; size];
        for edge in &model.edges {
            cells[edge.from][edge.to] = DEPENDENCY_CELL;
        }

        let mut header = Vec::with_capacity(size + 1);
        header.push(CORNER_LABEL);
        header.extend(model.nodes.iter().map(|n| n.name.as_str()));

        let mut rows = vec![header];
        for (node, row) in model.nodes.iter().zip(cells) {
            let mut line = Vec::with_capacity(size + 1);
            line.push(node.name.as_str());
            line.extend(row);
            rows.push(line);
        }
        rows
    }

    /// Quotes a CSV field if it contains a separator, quote or line break
    fn escape_csv_field(text: &str) -> String {
        if text.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", text.replace('"', "\"\""))
        } else {
            text.to_string()
        }
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_csv(rows: &[Vec<&str>]) -> String {
        let mut output = String::new();
        for row in rows {
            let line: Vec<String> = row.iter().map(|c| Self::escape_csv_field(c)).collect();
            output.push_str(&line.join(","));
            output.push('\n');
        }
        output
    }

    fn render_markdown(rows: &[Vec<&str>]) -> String {
        let mut output = String::new();
        for (index, row) in rows.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .map(|c| Self::escape_markdown_table_cell(c))
                .collect();
            output.push_str(&format!("| {} |\n", line.join(" | ")));

            if index == 0 {
                let separator = vec!["---"; row.len()].join(" | ");
                output.push_str(&format!("| {} |\n", separator));
            }
        }
        output
    }
}

impl Default for MatrixFormatter {
    fn default() -> Self {
        Self::new(MatrixFormat::default())
    }
}

impl GraphFormatter for MatrixFormatter {
    fn format(&self, model: &GraphReadModel) -> Result<String> {
        let rows = Self::rows(model);
        Ok(match self.format {
            MatrixFormat::Csv => Self::render_csv(&rows),
            MatrixFormat::Markdown => Self::render_markdown(&rows),
        })
    }

    fn file_extension(&self) -> &'static str {
        self.format.file_extension()
    }
}
