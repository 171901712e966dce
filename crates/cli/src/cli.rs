use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{GenerateOptions, generate_command, init_command};

/// Generate a Visual Studio solution from project files and their references
#[derive(Parser, Debug)]
#[command(name = "solgen", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "ENVIRONMENT:\n    \
    RUST_LOG=debug          Enable debug logging\n    \
    SOLGEN_CONFIG=<file>    Settings file to use instead of .solgen.json\n    \
    SOLGEN_VS_PATH=<exe>    Program used to open the generated solution")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project files to start from (defaults to every *.*proj below the current directory)
    pub projects: Vec<PathBuf>,

    /// Build configurations, comma separated (e.g. x86,x64)
    #[arg(short = 'c', long = "configs", value_delimiter = ',')]
    pub configs: Vec<String>,

    /// Where to write the solution file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Do not open the solution once written
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Print the solution instead of writing it
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Print the discovered project graph as JSON and exit
    #[arg(long = "graph", conflicts_with = "dry_run")]
    pub graph: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .solgen.json settings file
    Init {
        /// Directory to write it to (defaults to current directory)
        #[arg(long = "cwd")]
        cwd: Option<PathBuf>,

        /// Overwrite an existing settings file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Init { cwd, force }) => init_command(cwd.as_deref(), force),
            None => generate_command(GenerateOptions {
                projects: self.projects,
                configs: self.configs,
                output: self.output,
                open: !self.no_open,
                dry_run: self.dry_run,
                graph: self.graph,
            }),
        }
    }
}
