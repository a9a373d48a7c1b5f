//! nuget-depgraph - dependency graph analysis for NuGet lock files
//!
//! This library reads the package graph recorded in a `project.assets.json`,
//! indexes who uses each package, removes direct dependencies that are already
//! implied transitively, and renders diagrams, an adjacency matrix and a
//! statistics report. It follows a hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`graph_analysis`): The dependency graph and its algorithms
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! `cli` and `config` hold the command-line surface of the binary.
//!
//! # Example
//!
//! ```no_run
//! use nuget_depgraph::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = AnalyzeDependenciesUseCase::new(
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = AnalysisRequest::new(PathBuf::from("obj/project.assets.json"), "Contoso");
//! let response = use_case.execute(request)?;
//!
//! let report = ReportFormatter::new().format(&response.reduced)?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod graph_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{DotFormatter, MatrixFormatter, ReportFormatter};
    pub use crate::adapters::outbound::graphviz::GraphvizRasterizer;
    pub use crate::application::dto::{
        AnalysisRequest, AnalysisResponse, MatrixFormat, RenderRequest, RenderResponse,
    };
    pub use crate::application::read_models::{GraphReadModel, Snapshot};
    pub use crate::application::use_cases::{AnalyzeDependenciesUseCase, RenderOutputsUseCase};
    pub use crate::graph_analysis::domain::{
        Dependency, DependencyGraph, Package, PackageName, PackageRecord, Version,
    };
    pub use crate::graph_analysis::services::{
        DuplicatePolicy, EdgeReducer, GraphBuilder, GraphStatistics, ReductionReport,
        ScopeFilter, UsageIndexer,
    };
    pub use crate::ports::outbound::{
        ArtifactWriter, DiagramRasterizer, GraphFormatter, LockfileParseResult, LockfileReader,
        OutputPresenter, ProgressReporter,
    };
    pub use crate::shared::Result;
}
