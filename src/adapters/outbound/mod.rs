/// Outbound adapters - lock-file parsing, console feedback, file output,
/// text renderers and the Graphviz process
pub mod assets;
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod graphviz;
