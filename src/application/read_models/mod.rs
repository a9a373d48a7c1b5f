//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of one graph snapshot for renderers.

mod analysis_metadata;
mod graph_read_model;
mod graph_read_model_builder;
mod summary_view;

pub use analysis_metadata::AnalysisMetadata;
pub use graph_read_model::{
    EdgeView, GraphMetadataView, GraphReadModel, NodeView, RemovedEdgeView, Snapshot,
};
pub use graph_read_model_builder::GraphReadModelBuilder;
pub use summary_view::{DivergenceView, SummaryView, UnresolvedView, UsageView};
