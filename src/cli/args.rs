//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Exception-kind dispatch and C3 type linearization
#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .lineage.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Print shell completions for the given shell
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the method resolution order of a type
    Mro {
        /// Type name
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Declaration file (default: `declarations` from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the method resolution order of every type
    Table {
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show type and kind hierarchies as trees
    Tree {
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Check whether a type is a subclass of any of the candidates
    IsSubclass {
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Candidate base types (tuple check)
        #[arg(required = true)]
        candidates: Vec<String>,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Find the type providing a member
    Resolve {
        #[arg(value_name = "TYPE")]
        type_name: String,
        member: String,
        /// Look up from inside the type (private members visible)
        #[arg(long)]
        internal: bool,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Resolve `super(AFTER, TYPE).MEMBER`
    Super {
        #[arg(value_name = "TYPE")]
        type_name: String,
        after: String,
        member: String,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show the order in which cooperative `super()` calls of a member complete
    Chain {
        #[arg(value_name = "TYPE")]
        type_name: String,
        member: String,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show which handler catches a raised kind
    Catch {
        /// Kind being raised
        raised: String,
        /// Handler kinds in `except` order
        #[arg(required = true)]
        handlers: Vec<String>,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Prompt until a value inside the configured range is entered
    Range,

    /// Compute simple interest
    Interest {
        amount: f64,
        years: f64,
        /// Rate in percent
        rate: f64,
    },

    /// Divide two numbers, showing the chained error on division by zero
    Divide {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template config
    Template,
}
