/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports,
/// providing the actual integration with the file system, the console
/// and Graphviz. The CLI (`cli` module and `main.rs`) acts as the inbound adapter.
pub mod outbound;
