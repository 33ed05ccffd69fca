//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// wholelife - whole-life-cost analysis for building components
#[derive(Parser, Debug)]
#[command(name = "wlc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project directory holding wholelife.yml
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Distribute cost facts over the horizon and discount to present value
    Distribute(DistributeArgs),

    /// Apportion life-cycle totals to stakeholders
    Attribute(AttributeArgs),

    /// Run the full analysis and optionally export a snapshot
    Analyze(AnalyzeArgs),

    /// Compare two exported analysis snapshots
    Compare(CompareArgs),

    /// Serve the engines over HTTP
    #[cfg(feature = "serve")]
    Serve(ServeArgs),
}

/// Output formats for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Human-readable tables
    Pretty,
}

/// Arguments for the distribute command
#[derive(Args, Debug)]
pub struct DistributeArgs {
    /// Path to the analysis input JSON (project, components, facts)
    #[arg(short, long)]
    pub input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,
}

/// Arguments for the attribute command
#[derive(Args, Debug)]
pub struct AttributeArgs {
    /// Path to the analysis input JSON (project, components, facts, rules)
    #[arg(short, long)]
    pub input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the analysis input JSON (project, components, facts, rules)
    #[arg(short, long)]
    pub input: String,

    /// Write the resulting snapshot to this file
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to the current snapshot file
    #[arg(long)]
    pub current: String,

    /// Path to the previous snapshot file
    #[arg(long)]
    pub previous: String,

    /// Override the configured comparison tolerance (currency units)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,
}

/// Arguments for the serve command
#[cfg(feature = "serve")]
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short = 'P', long, default_value_t = 8090)]
    pub port: u16,
}
