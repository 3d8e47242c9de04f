#![deny(unsafe_code)]

mod cli;

use clap::Parser as _;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Commands;
use prefixer::{Command, Config, ProfileSource, Runner};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.verbose.log_filter()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let profile = match (args.profile, args.profile_file) {
        (_, Some(path)) => ProfileSource::File(path),
        (Some(name), None) => ProfileSource::Builtin(name),
        (None, None) => ProfileSource::default(),
    };
    let command = match args.command {
        Commands::Key { property } => Command::Key { property },
        Commands::Value { property, value } => Command::Value { property, value },
        Commands::Resolve { property, value } => Command::Resolve { property, value },
        Commands::Audit { path } => Command::Audit { path },
        Commands::Profiles => Command::Profiles,
    };

    let config = Config {
        profile,
        strategy: args.strategy,
        command,
        verbosity: args.verbose,
    };

    Runner::new(config).run()?;
    Ok(())
}
