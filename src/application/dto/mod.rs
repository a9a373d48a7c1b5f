/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_request;
mod analysis_response;
mod matrix_format;
mod render_request;

pub use analysis_request::{AnalysisRequest, DEFAULT_TOP};
pub use analysis_response::AnalysisResponse;
pub use matrix_format::MatrixFormat;
pub use render_request::{RenderRequest, RenderResponse, DEFAULT_LAYOUT};
