use std::path::PathBuf;

use clap::{Parser, Subcommand};

use prefixer::{ProbeStrategy, VerbosityLevel};

#[derive(Parser, Debug)]
#[command(version, about = "Find the vendor-prefixed CSS an environment honors", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "NAME",
        help = "Built-in capability profile to probe [default: modern]"
    )]
    pub profile: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        conflicts_with = "profile",
        help = "TOML capability profile to probe"
    )]
    pub profile_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value_t = ProbeStrategy::LastWriteWins,
        value_name = "STRATEGY",
        help = "How candidate values are written to probe elements"
    )]
    pub strategy: ProbeStrategy,

    #[arg(
        long,
        short,
        global = true,
        default_value_t = VerbosityLevel::Quiet,
        value_name = "LEVEL",
        help = "Set the verbosity level"
    )]
    pub verbose: VerbosityLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a property name, e.g. `user-select`
    Key { property: String },
    /// Resolve a value for a property, e.g. `display flex`
    Value {
        property: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Resolve the property name, falling back to the value
    Resolve {
        property: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Resolve every declaration in a stylesheet
    Audit {
        #[arg(value_name = "CSS_FILE")]
        path: PathBuf,
    },
    /// List the built-in profiles
    Profiles,
}
