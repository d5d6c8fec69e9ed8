//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::extensions::ExtensionSet;
use crate::flows::flatten::{RunConfig, SummaryFormat, DEFAULT_OUTPUT_BASE};

/// flatcode - flatten a source tree into one annotated text file.
#[derive(Parser, Debug)]
#[command(name = "flatcode")]
#[command(
    author,
    version,
    about,
    arg_required_else_help = true,
    long_about = r#"flatcode walks a directory tree and concatenates every matching file into a
single text file in the current directory. Each file is preceded by a
`File: <name>` header and followed by a blank line.

Always skipped:
- hidden directories (.git, .venv, ...) and dependency caches (node_modules, ...)
- lock files and module manifests (Cargo.lock, go.sum, package-lock.json, ...)
- files with any executable bit set
- the output file itself

The reported token count is a whitespace word count, an approximation of what
an LLM tokenizer would produce.

Examples:
    flatcode --path .
    flatcode --path src --filetype .rs,.toml --output context
    flatcode -p . -f .py -v
"#
)]
pub struct Cli {
    /// Root directory to walk.
    #[arg(short, long, value_name = "DIR", env = "FLATCODE_PATH")]
    pub path: PathBuf,

    /// Extensions to include, comma-separated (e.g. .py,.js,.html).
    #[arg(
        short,
        long,
        default_value = "",
        value_name = "EXTS",
        env = "FLATCODE_FILETYPE",
        long_help = "Comma-separated list of file extensions to include, each starting with '.'\n\
(e.g. .py,.js,.html). A missing leading '.' is added.\n\n\
Leave empty to include all files."
    )]
    pub filetype: String,

    /// Output base name; `.txt` is appended.
    #[arg(
        short,
        long,
        default_value = DEFAULT_OUTPUT_BASE,
        value_name = "NAME",
        env = "FLATCODE_OUTPUT",
        long_help = "Base name of the output file. The result is written to <NAME>.txt in the\n\
current directory, replacing any previous content."
    )]
    pub output: String,

    /// Report every prune/skip/accept decision on stderr.
    #[arg(
        short,
        long,
        long_help = "Write every traversal decision (directory pruned, file skipped with its\n\
reason, file accepted) and the resolved output path to stderr.\n\n\
RUST_LOG still controls every other target."
    )]
    pub verbose: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let output_dir = std::env::current_dir()?;
        Ok(RunConfig::new(&self.path, output_dir)
            .with_extensions(ExtensionSet::parse(&self.filetype))
            .with_output_base(&self.output))
    }

    fn summary_format(&self) -> SummaryFormat {
        if self.json {
            SummaryFormat::Json
        } else {
            SummaryFormat::Text
        }
    }
}

/// Whether anything written to stderr may carry ANSI colors.
pub fn stderr_color(cli: &Cli) -> bool {
    !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// Set up colors and the stderr diagnostic stream.
///
/// `--verbose` always enables the decision stream, whatever `RUST_LOG` says.
pub fn init_output(cli: &Cli) -> Result<()> {
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flatcode=warn"));
    if cli.verbose {
        env_filter = env_filter.add_directive("flatcode=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(stderr_color(cli))
        .with_target(false)
        .without_time()
        .init();
    Ok(())
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.run_config()?;
    crate::flows::flatten::run_flatten(&config, cli.summary_format())
}
