use clap::Parser;
use nuget_depgraph::adapters::outbound::console::StderrProgressReporter;
use nuget_depgraph::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use nuget_depgraph::adapters::outbound::graphviz::GraphvizRasterizer;
use nuget_depgraph::application::dto::{AnalysisRequest, RenderRequest};
use nuget_depgraph::application::use_cases::{AnalyzeDependenciesUseCase, RenderOutputsUseCase};
use nuget_depgraph::cli::{resolve_lockfile, resolve_prefix, Args, RunOptions};
use nuget_depgraph::config::{self, ConfigFile};
use nuget_depgraph::ports::outbound::ProgressReporter;
use nuget_depgraph::shared::error::ExitCode;
use nuget_depgraph::shared::Result;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported through clap errors as well
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        for cause in e.chain().skip(1) {
            eprintln!("\n{} {}", "Caused by:".red(), cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let interactive = !args.no_prompt && io::stdin().is_terminal();
    let working_dir = std::env::current_dir()?;

    let (options, prefix) = {
        let mut input = io::stdin().lock();
        let mut prompt = io::stderr();

        let lockfile = resolve_lockfile(
            args.lockfile.clone(),
            &working_dir,
            interactive,
            &mut input,
            &mut prompt,
        )?;
        let config = load_config(&args, &lockfile)?;
        let options = RunOptions::merge(&args, lockfile, &config)?;
        let prefix = resolve_prefix(options.prefix.clone(), interactive, &mut input, &mut prompt)?;
        (options, prefix)
    };
    log::debug!("Resolved options: {:?}", options);

    // Analysis
    let analyze = AnalyzeDependenciesUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
    let request = AnalysisRequest::new(options.lockfile.clone(), prefix)
        .with_target_framework(options.target_framework.clone())
        .with_duplicate_policy(options.duplicate_policy)
        .with_top(options.top);
    let analysis = analyze.execute(request)?;

    // Outputs
    let reporter = StderrProgressReporter::new();
    let render = RenderOutputsUseCase::new(
        FileSystemWriter::new(options.output_dir.clone()),
        StdoutPresenter::new(),
        StderrProgressReporter::new(),
        GraphvizRasterizer::new(options.layout.clone()),
    );
    let render_request = RenderRequest {
        matrix_format: options.matrix_format,
        layout: options.layout.clone(),
        render_images: options.render_images,
        ..RenderRequest::default()
    };
    let response = render.execute(&analysis, &render_request).await?;

    reporter.report_completion(&format!(
        "Wrote {} file(s) and {} image(s) to {}",
        response.artifacts.len(),
        response.images.len(),
        options.output_dir.display()
    ));

    Ok(())
}

/// Explicit `--config` wins; otherwise look next to the lock file
fn load_config(args: &Args, lockfile: &Path) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path);
    }

    let dir = match lockfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(config::discover_config(dir)?.unwrap_or_default())
}
