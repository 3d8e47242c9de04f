#![deny(unsafe_code)]

mod app;
pub mod audit;
pub mod cache;
pub mod css;
pub mod host;
pub mod prefix;
pub mod property;
pub mod resolver;
pub mod surface;
mod utils;

pub use app::{Command, Config, ProfileSource, Runner, VerbosityLevel};
pub use cache::CachingResolver;
pub use host::Profile;
pub use prefix::{Vendor, PREFIX_TABLE, VALUE_PREFIXES};
pub use property::{PropertyName, PropertyResolution, Resolution, ValueResolution};
pub use resolver::{PrefixResolver, ProbeStrategy};
pub use surface::{ProbeElement, StyleSurface};
pub use utils::to_camel_case;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("property name is empty")]
    EmptyPropertyName,
    #[error("unknown profile: {0}")]
    UnknownProfile(String),
    #[error("{0}")]
    Profile(String),
}

pub type Result<T> = std::result::Result<T, Error>;
