use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};
use shapeguard::schema::{Schema, SchemaRegistry, DEFAULT_MAX_DEPTH};
use shapeguard::OrderRequest;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod describe;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode and validate a payload.
    Check(CheckArgs),
    /// Print the fields of a shape.
    Describe(DescribeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Describe(args) => describe::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Request shapes known to the CLI.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum Shape {
    #[default]
    Order,
}

impl Shape {
    pub fn schema(self) -> Arc<Schema> {
        match self {
            Shape::Order => SchemaRegistry::shared().schema_of::<OrderRequest>(),
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Payload file. Reads stdin when omitted.
    pub file: Option<PathBuf>,
    /// Shape the payload must match.
    #[arg(long, value_enum, default_value_t = Shape::Order)]
    pub shape: Shape,
    /// Largest accepted payload in bytes [default: 1048576].
    #[arg(long, value_name = "BYTES", env = "SHAPEGUARD_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Shape to describe.
    #[arg(long, value_enum, default_value_t = Shape::Order)]
    pub shape: Shape,
    /// Stop expanding nested records below this depth.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
