/// Application layer - analysis and rendering use cases
///
/// Use cases drive the graph services through the ports; read models are
/// the flattened snapshots every formatter renders from.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
