use crate::application::read_models::{GraphReadModel, Snapshot, SummaryView};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use std::fmt::Write;

const RULE: &str = "--------------------------------------------";

/// ReportFormatter adapter rendering the console statistics report
///
/// The original snapshot gets the full report: counts, per-package listing,
/// averages, usage histogram and the top-N listings. The reduced snapshot
/// gets counts, averages and the list of removed edges.
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    fn scope(prefix: &str) -> String {
        if prefix.is_empty() {
            "all".to_string()
        } else {
            format!("{}.*", prefix)
        }
    }

    fn render_header(output: &mut String, model: &GraphReadModel) -> Result<()> {
        let title = format!(
            "Dependency report: {} ({} packages)",
            model.metadata.snapshot,
            Self::scope(&model.metadata.prefix)
        );
        writeln!(output, "{}", title)?;
        writeln!(output, "{}", "=".repeat(title.chars().count()))?;
        Ok(())
    }

    fn render_counts(output: &mut String, summary: &SummaryView) -> Result<()> {
        writeln!(output, "Packages:            {}", summary.package_count)?;
        writeln!(output, "Distinct packages:   {}", summary.distinct_name_count)?;
        writeln!(output, "Main packages (x.y.z): {}", summary.main_package_count)?;
        writeln!(output, "Dependency edges:    {}", summary.edge_count)?;
        writeln!(output)?;
        Ok(())
    }

    fn render_listing(output: &mut String, summary: &SummaryView) -> Result<()> {
        writeln!(output, "Packages by usage")?;
        writeln!(output, "{}", RULE)?;
        for (index, usage) in summary.by_usage.iter().enumerate() {
            writeln!(
                output,
                "{:>3}. {} {} has {} dependencies and is used by {} packages",
                index, usage.name, usage.version, usage.dependency_count, usage.usage_count
            )?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn render_averages(output: &mut String, summary: &SummaryView) -> Result<()> {
        let fmt_avg = |value: Option<f64>| match value {
            Some(v) => format!("{:.2}", v),
            None => "n/a".to_string(),
        };
        writeln!(
            output,
            "Average dependencies per package: {}",
            fmt_avg(summary.average_dependency_count)
        )?;
        writeln!(
            output,
            "Average consumers per package:    {}",
            fmt_avg(summary.average_usage_count)
        )?;
        writeln!(output)?;
        Ok(())
    }

    fn render_histogram(output: &mut String, summary: &SummaryView) -> Result<()> {
        writeln!(output, "Usage histogram")?;
        writeln!(output, "{}", RULE)?;
        for (used_by, count) in summary.usage_histogram.iter().enumerate() {
            if *count > 0 {
                writeln!(output, "{:>5} package(s) used by {} packages", count, used_by)?;
            }
        }
        writeln!(output)?;
        Ok(())
    }

    fn render_top_usage(output: &mut String, summary: &SummaryView) -> Result<()> {
        writeln!(output, "Top {} most used packages", summary.top)?;
        writeln!(output, "{}", RULE)?;
        for usage in &summary.top_by_usage {
            writeln!(
                output,
                "{} is used by {} packages with {} different versions",
                usage.name, usage.usage_count, usage.distinct_declared_versions
            )?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn render_top_divergence(output: &mut String, summary: &SummaryView) -> Result<()> {
        writeln!(
            output,
            "Top {} packages by number of declared versions",
            summary.top
        )?;
        writeln!(output, "{}", RULE)?;
        for divergence in &summary.top_by_divergence {
            writeln!(
                output,
                "{} {} is used by {} packages with {} different versions{}",
                divergence.name,
                divergence.version,
                divergence.usage_count,
                divergence.declared_versions.len(),
                if divergence.declared_versions.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", divergence.declared_versions.join(", "))
                }
            )?;
            if divergence.version_mismatch {
                writeln!(
                    output,
                    "    Alert! {} is declared with a different major version than {}",
                    divergence.name, divergence.version
                )?;
            }
        }
        writeln!(output)?;
        Ok(())
    }

    fn render_unresolved(output: &mut String, summary: &SummaryView) -> Result<()> {
        if summary.unresolved.is_empty() {
            return Ok(());
        }
        writeln!(
            output,
            "Dependencies outside the graph: {}",
            summary.unresolved.len()
        )?;
        writeln!(output, "{}", RULE)?;
        for unresolved in &summary.unresolved {
            writeln!(
                output,
                "{} -> {} {}",
                unresolved.consumer, unresolved.dependency, unresolved.declared_version
            )?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn render_removed(output: &mut String, model: &GraphReadModel) -> Result<()> {
        writeln!(
            output,
            "Removed redundant direct dependencies: {}",
            model.removed_edges.len()
        )?;
        writeln!(output, "{}", RULE)?;
        for removed in &model.removed_edges {
            writeln!(
                output,
                "{} -> {} {} (reachable through {})",
                removed.consumer, removed.dependency, removed.declared_version, removed.provider
            )?;
        }
        writeln!(output)?;
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for ReportFormatter {
    fn format(&self, model: &GraphReadModel) -> Result<String> {
        let summary = &model.summary;
        let mut output = String::new();

        Self::render_header(&mut output, model)?;
        Self::render_counts(&mut output, summary)?;

        match model.metadata.snapshot {
            Snapshot::Original => {
                Self::render_listing(&mut output, summary)?;
                Self::render_averages(&mut output, summary)?;
                Self::render_histogram(&mut output, summary)?;
                Self::render_top_usage(&mut output, summary)?;
                Self::render_top_divergence(&mut output, summary)?;
                Self::render_unresolved(&mut output, summary)?;
            }
            Snapshot::Reduced => {
                Self::render_averages(&mut output, summary)?;
                Self::render_removed(&mut output, model)?;
            }
        }

        Ok(output)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
