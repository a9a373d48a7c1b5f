use clap::{ArgAction, Parser};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::application::dto::{MatrixFormat, DEFAULT_LAYOUT, DEFAULT_TOP};
use crate::config::{self, ConfigFile};
use crate::graph_analysis::services::DuplicatePolicy;
use crate::shared::error::AppError;
use crate::shared::Result;

/// File name looked up in the working directory when no lock file is given
pub const DEFAULT_LOCKFILE: &str = "project.assets.json";

/// Analyze the package dependency graph of a NuGet restore
#[derive(Parser, Debug)]
#[command(name = "nuget-depgraph")]
#[command(version)]
#[command(
    about = "Analyze NuGet dependency graphs: reverse usage, redundant direct dependencies, diagrams and matrices",
    long_about = None
)]
pub struct Args {
    /// Path to project.assets.json (defaults to ./project.assets.json)
    pub lockfile: Option<PathBuf>,

    /// Case-insensitive package name prefix, e.g. "Contoso" (empty keeps every package)
    pub prefix: Option<String>,

    /// Only read this target framework (e.g. net8.0) instead of all of them
    #[arg(short, long, value_name = "FRAMEWORK")]
    pub target: Option<String>,

    /// Directory receiving the matrix, diagrams and images (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Length of the top-N listings in the report
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Graphviz layout engine: dot, neato, twopi, circo, fdp, sfdp, osage or patchwork
    #[arg(short, long, value_name = "ENGINE")]
    pub layout: Option<String>,

    /// Write the .dot files without rendering PNG images
    #[arg(long)]
    pub no_render: bool,

    /// Adjacency matrix format: csv or markdown
    #[arg(short, long, value_name = "FORMAT")]
    pub matrix_format: Option<MatrixFormat>,

    /// How repeated package names are resolved: last-wins, first-wins or reject
    #[arg(long = "duplicates", value_name = "POLICY")]
    pub duplicates: Option<DuplicatePolicy>,

    /// Config file (defaults to nuget-depgraph.config.yml next to the lock file)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Never ask for missing arguments
    #[arg(long)]
    pub no_prompt: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter matching the number of `-v` flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Fully resolved run options: command line first, then config file, then defaults
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub lockfile: PathBuf,
    /// `None` means the prefix still has to be asked for
    pub prefix: Option<String>,
    pub target_framework: Option<String>,
    pub output_dir: PathBuf,
    pub top: usize,
    pub layout: String,
    pub render_images: bool,
    pub matrix_format: MatrixFormat,
    pub duplicate_policy: DuplicatePolicy,
}

impl RunOptions {
    /// Merges command-line values over the config file
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the merged layout or top-N length is invalid
    pub fn merge(args: &Args, lockfile: PathBuf, config: &ConfigFile) -> Result<Self> {
        let top = args.top.or(config.top).unwrap_or(DEFAULT_TOP);
        config::validate_top(top)?;

        let layout = args
            .layout
            .clone()
            .or_else(|| config.layout.clone())
            .unwrap_or_else(|| DEFAULT_LAYOUT.to_string());
        config::validate_layout(&layout)?;

        let output_dir = args
            .output_dir
            .clone()
            .or_else(|| config.output_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let render_images = !args.no_render && config.render_images.unwrap_or(true);

        Ok(Self {
            lockfile,
            prefix: args.prefix.clone().or_else(|| config.prefix.clone()),
            target_framework: args
                .target
                .clone()
                .or_else(|| config.target_framework.clone()),
            output_dir,
            top,
            layout,
            render_images,
            matrix_format: match args.matrix_format {
                Some(format) => format,
                None => config.matrix_format()?.unwrap_or_default(),
            },
            duplicate_policy: match args.duplicates {
                Some(policy) => policy,
                None => config.duplicate_policy()?.unwrap_or_default(),
            },
        })
    }
}

/// Writes `question` and reads one trimmed line; `None` at end of input
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Picks the lock file: explicit path, `./project.assets.json`, or an interactive answer
///
/// # Errors
/// Returns `AppError::LockfileNotFound` when no lock file can be determined
pub fn resolve_lockfile<R: BufRead, W: Write>(
    explicit: Option<PathBuf>,
    working_dir: &Path,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let default = working_dir.join(DEFAULT_LOCKFILE);
    if default.is_file() {
        log::info!("Using {}", default.display());
        return Ok(default);
    }

    if interactive {
        let answer = prompt_line(input, output, "📄 Path to project.assets.json: ")?;
        if let Some(answer) = answer.filter(|a| !a.is_empty()) {
            return Ok(PathBuf::from(answer));
        }
    }

    Err(AppError::LockfileNotFound {
        path: default,
        suggestion: "Pass the lock file as the first argument, or run `dotnet restore` to create obj/project.assets.json".to_string(),
    }
    .into())
}

/// Picks the prefix: the given value, an interactive answer, or no filter
pub fn resolve_prefix<R: BufRead, W: Write>(
    given: Option<String>,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if let Some(prefix) = given {
        return Ok(prefix.trim().to_string());
    }
    if !interactive {
        return Ok(String::new());
    }
    let answer = prompt_line(
        input,
        output,
        "🔎 Package name prefix (empty for all packages): ",
    )?;
    Ok(answer.unwrap_or_default())
}
