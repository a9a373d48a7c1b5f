use crate::application::dto::DEFAULT_LAYOUT;
use crate::application::read_models::GraphReadModel;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use std::collections::HashMap;
use std::fmt::Write;

/// Colours handed out to root families in order of first appearance
const PALETTE: &[&str] = &[
    "steelblue",
    "darkorange",
    "forestgreen",
    "firebrick",
    "mediumpurple",
    "sienna",
    "hotpink",
    "gray40",
    "olivedrab",
    "darkcyan",
    "goldenrod",
    "slateblue",
    "tomato",
    "seagreen",
    "orchid",
    "peru",
];

/// Edge colour between packages of the same root family
const SAME_ROOT_EDGE_COLOR: &str = "gray88";
/// Edge colour between different root families
const CROSS_ROOT_EDGE_COLOR: &str = "black";

/// Base node width in inches; each inbound edge widens the node
const BASE_NODE_WIDTH: f64 = 0.5;
const WIDTH_PER_INBOUND_EDGE: f64 = 0.15;

/// DotFormatter adapter rendering a graph snapshot as a Graphviz digraph
///
/// One node per package, labelled with name and version and widened by its
/// inbound degree; one edge per dependency entry that resolves to a node.
pub struct DotFormatter {
    layout: String,
}

impl DotFormatter {
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
        }
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Assigns palette colours per root family, in node order
    fn root_colors(model: &GraphReadModel) -> HashMap<&str, &'static str> {
        let mut colors = HashMap::new();
        for node in &model.nodes {
            let next = PALETTE[colors.len() % PALETTE.len()];
            colors.entry(node.root.as_str()).or_insert(next);
        }
        colors
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT)
    }
}

impl GraphFormatter for DotFormatter {
    fn format(&self, model: &GraphReadModel) -> Result<String> {
        let colors = Self::root_colors(model);
        let mut dot = String::new();

        writeln!(
            dot,
            "// {} {}: {} (run {}, {})",
            model.metadata.tool_name,
            model.metadata.tool_version,
            model.metadata.snapshot,
            model.metadata.run_id,
            model.metadata.timestamp
        )?;
        writeln!(dot, "digraph G {{")?;
        writeln!(dot, "  layout=\"{}\";", Self::escape(&self.layout))?;
        writeln!(dot, "  ranksep=3;")?;
        writeln!(dot, "  graph [overlap=false, splines=true];")?;
        writeln!(dot, "  node [shape=circle, penwidth=2, fontsize=10];")?;
        writeln!(dot, "  edge [style=solid];")?;

        for (index, node) in model.nodes.iter().enumerate() {
            let width = BASE_NODE_WIDTH + WIDTH_PER_INBOUND_EDGE * node.inbound as f64;
            let color = colors.get(node.root.as_str()).copied().unwrap_or(PALETTE[0]);
            writeln!(
                dot,
                "  n{} [label=\"{}\\n{}\", width={:.2}, color=\"{}\"];",
                index,
                Self::escape(&node.name),
                Self::escape(&node.version),
                width,
                color
            )?;
        }

        for edge in &model.edges {
            let color = if edge.same_root {
                SAME_ROOT_EDGE_COLOR
            } else {
                CROSS_ROOT_EDGE_COLOR
            };
            writeln!(dot, "  n{} -> n{} [color=\"{}\"];", edge.from, edge.to, color)?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    fn file_extension(&self) -> &'static str {
        "dot"
    }
}
