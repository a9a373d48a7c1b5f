/// Ports - the traits the graph analysis core talks through
///
/// `inbound` holds the analysis entry point driven by the CLI, `outbound`
/// the lock-file, formatting, output and rendering seams implemented by
/// the adapters.
pub mod inbound;
pub mod outbound;
