use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use tracing::info;

use crate::audit::{audit, AuditReport};
use crate::cache::CachingResolver;
use crate::host::Profile;
use crate::property::PropertyName;
use crate::resolver::{PrefixResolver, ProbeStrategy};
use crate::utils::PrintableReport;

pub const DEFAULT_PROFILE: &str = "modern";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
}

impl VerbosityLevel {
    /// The default log filter for this level.
    pub fn log_filter(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerbosityLevel::Quiet => write!(f, "quiet"),
            VerbosityLevel::Normal => write!(f, "normal"),
            VerbosityLevel::Verbose => write!(f, "verbose"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    Builtin(String),
    File(PathBuf),
}

impl Default for ProfileSource {
    fn default() -> Self {
        ProfileSource::Builtin(DEFAULT_PROFILE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key { property: String },
    Value { property: String, value: String },
    Resolve { property: String, value: String },
    Audit { path: PathBuf },
    Profiles,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: ProfileSource,
    pub strategy: ProbeStrategy,
    pub command: Command,
    pub verbosity: VerbosityLevel,
}

#[derive(Debug)]
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        info!(command = ?self.config.command, "running");
        match &self.config.command {
            Command::Audit { path } => self.audit_report(path)?.print(self.config.verbosity),
            _ => println!("{}", self.answer()?),
        }
        Ok(())
    }

    /// The output of every command except `audit`.
    pub fn answer(&self) -> Result<String> {
        if self.config.command == Command::Profiles {
            return Profile::builtin_names()
                .map(|name| -> Result<String> {
                    let profile = Profile::builtin(name)?;
                    Ok(format!("{:<14} {}", profile.name(), profile.description()))
                })
                .collect::<Result<Vec<_>>>()
                .map(|lines| lines.join("\n"));
        }

        let profile = self.load_profile()?;
        let resolver = PrefixResolver::new(&profile).with_strategy(self.config.strategy);
        info!(strategy = %resolver.strategy(), "probing");
        let answer = match &self.config.command {
            Command::Key { property } => resolver
                .resolve_property_name(&PropertyName::new(property)?)
                .to_string(),
            Command::Value { property, value } => resolver
                .resolve_property_value(&PropertyName::new(property)?, value)
                .to_string(),
            Command::Resolve { property, value } => resolver
                .resolve(&PropertyName::new(property)?, value)
                .to_string(),
            Command::Audit { .. } | Command::Profiles => bail!("no single-line answer"),
        };
        Ok(answer)
    }

    pub fn audit_report(&self, path: &Path) -> Result<AuditReport> {
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let profile = self.load_profile()?;
        let resolver =
            CachingResolver::new(PrefixResolver::new(&profile).with_strategy(self.config.strategy));
        info!(strategy = %resolver.inner().strategy(), "probing");
        audit(&css, &resolver).with_context(|| format!("failed to audit {}", path.display()))
    }

    fn load_profile(&self) -> Result<Profile> {
        let profile = match &self.config.profile {
            ProfileSource::Builtin(name) => Profile::builtin(name)?,
            ProfileSource::File(path) => Profile::load(path)
                .with_context(|| format!("failed to load profile {}", path.display()))?,
        };
        info!(profile = profile.name(), "using profile");
        Ok(profile)
    }
}
