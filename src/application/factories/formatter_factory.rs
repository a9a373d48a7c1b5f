use crate::adapters::outbound::formatters::{DotFormatter, MatrixFormatter, ReportFormatter};
use crate::application::dto::MatrixFormat;
use crate::ports::outbound::GraphFormatter;

/// The kinds of text output a graph snapshot can be rendered to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterType {
    /// Graphviz diagram using the given layout engine
    Diagram { layout: String },
    /// Adjacency matrix
    Matrix(MatrixFormat),
    /// Console statistics report
    Report,
}

/// Factory for creating graph formatters
///
/// This factory encapsulates the selection of formatter adapters, so the
/// render use case depends only on the `GraphFormatter` port.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output type
    ///
    /// # Examples
    /// ```
    /// use nuget_depgraph::application::dto::MatrixFormat;
    /// use nuget_depgraph::application::factories::{FormatterFactory, FormatterType};
    ///
    /// let formatter = FormatterFactory::create(FormatterType::Matrix(MatrixFormat::Csv));
    /// assert_eq!(formatter.file_extension(), "csv");
    /// ```
    pub fn create(formatter_type: FormatterType) -> Box<dyn GraphFormatter> {
        match formatter_type {
            FormatterType::Diagram { layout } => Box::new(DotFormatter::new(layout)),
            FormatterType::Matrix(format) => Box::new(MatrixFormatter::new(format)),
            FormatterType::Report => Box::new(ReportFormatter::new()),
        }
    }

    /// Returns the progress message shown while the output is written
    pub fn progress_message(formatter_type: &FormatterType) -> &'static str {
        match formatter_type {
            FormatterType::Diagram { .. } => "📝 Writing Graphviz diagram",
            FormatterType::Matrix(MatrixFormat::Csv) => "📝 Writing CSV dependency matrix",
            FormatterType::Matrix(MatrixFormat::Markdown) => "📝 Writing Markdown dependency matrix",
            FormatterType::Report => "📝 Writing statistics report",
        }
    }
}
