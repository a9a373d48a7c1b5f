/// Use cases module containing application business logic orchestration
mod analyze_dependencies;
mod render_outputs;

pub use analyze_dependencies::AnalyzeDependenciesUseCase;
pub use render_outputs::RenderOutputsUseCase;
