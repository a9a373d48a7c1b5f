/// Result alias used above the graph core (application, adapters, binary).
/// Core operations return `std::result::Result<T, GraphError>` instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
