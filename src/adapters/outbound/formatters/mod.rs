/// Formatter adapters rendering graph snapshots as text
mod dot_formatter;
mod matrix_formatter;
mod report_formatter;

pub use dot_formatter::DotFormatter;
pub use matrix_formatter::MatrixFormatter;
pub use report_formatter::ReportFormatter;
