/// Lock-file format adapters
mod project_assets_parser;

pub use project_assets_parser::ProjectAssetsParser;
