//! CLI argument parsing for the enum pipeline.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "specbind",
    version,
    about = "Read, normalize, and resolve API enum definitions",
    after_help = "Examples:\n  specbind enums --spec signatures.xml --override overrides.xml --api gl --versions \"1.0|1.1\"\n  specbind typemap --typemap gl.tm --target csharp.tm\n  specbind settings-stub > settings.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Enums(EnumsArgs),
    Typemap(TypemapArgs),
    /// Print the default settings JSON
    SettingsStub,
}

/// Inputs for reading and processing enums.
#[derive(Args, Debug)]
#[command(about = "Read specification enums and apply override documents")]
pub struct EnumsArgs {
    /// Specification document; repeat to merge several in order
    #[arg(long = "spec", value_name = "XML", required = true)]
    pub specs: Vec<PathBuf>,

    /// Override document; repeat to apply several in order
    #[arg(long = "override", value_name = "XML")]
    pub overrides: Vec<PathBuf>,

    /// API name selecting add/delete/replace sections
    #[arg(long, value_name = "NAME", default_value = "")]
    pub api: String,

    /// Pipe-separated API versions, e.g. "1.0|1.1"
    #[arg(long, value_name = "LIST", default_value = "")]
    pub versions: String,

    /// Settings JSON (defaults apply when absent)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Output path for the JSON report (stdout when absent)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Inputs for reading type-map files.
#[derive(Args, Debug)]
#[command(about = "Parse type-map files and print them as JSON")]
pub struct TypemapArgs {
    /// Registry type map
    #[arg(long, value_name = "FILE")]
    pub typemap: PathBuf,

    /// Target-language type map
    #[arg(long, value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Settings JSON (defaults apply when absent)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}
