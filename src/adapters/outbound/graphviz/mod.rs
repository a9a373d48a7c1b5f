/// Graphviz adapter rasterizing DOT diagrams
mod rasterizer;

pub use rasterizer::GraphvizRasterizer;
