use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use crate::prefix::{PREFIX_TABLE, VALUE_PREFIXES};
use crate::property::{PropertyName, PropertyResolution, Resolution, ValueResolution};
use crate::surface::{ProbeElement, StyleSurface};

/// How candidate values are written to probe elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProbeStrategy {
    /// All candidates go to one probe in write order; whatever survives is reported.
    #[default]
    LastWriteWins,
    /// Each candidate gets its own probe; the highest-priority accepted one is reported.
    Isolated,
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProbeStrategy::LastWriteWins => write!(f, "last-write-wins"),
            ProbeStrategy::Isolated => write!(f, "isolated"),
        }
    }
}

/// Finds the concrete property name or value a style surface honors.
#[derive(Debug)]
pub struct PrefixResolver<S> {
    surface: S,
    strategy: ProbeStrategy,
}

impl<S> PrefixResolver<S>
where
    S: StyleSurface,
{
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            strategy: ProbeStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tries the unprefixed key, then every vendor in table order. First hit wins.
    pub fn resolve_property_name(&self, key: &PropertyName) -> PropertyResolution {
        let camel_key = key.camel_key();
        if self.surface.recognizes(&camel_key) {
            debug!(key = %key, camel_key, "natively supported");
            return PropertyResolution::Native(key.to_string());
        }

        for vendor in PREFIX_TABLE.iter() {
            let candidate = key.prefixed_camel_key(vendor);
            if self.surface.recognizes(&candidate) {
                debug!(key = %key, candidate, "supported with vendor prefix");
                return PropertyResolution::Prefixed {
                    vendor,
                    name: key.prefixed(vendor),
                };
            }
        }

        debug!(key = %key, "not supported under any prefix");
        PropertyResolution::Unsupported
    }

    pub fn resolve_property_value(&self, key: &PropertyName, value: &str) -> ValueResolution {
        let reported = match self.strategy {
            ProbeStrategy::LastWriteWins => self.probe_last_write_wins(key, value),
            ProbeStrategy::Isolated => self.probe_isolated(key, value),
        };
        if reported.is_empty() {
            ValueResolution::Unsupported
        } else {
            ValueResolution::Supported(reported)
        }
    }

    /// Answers the property question first and falls back to the value question.
    pub fn resolve(&self, key: &PropertyName, value: &str) -> Resolution {
        match self.resolve_property_name(key) {
            PropertyResolution::Unsupported => match self.resolve_property_value(key, value) {
                ValueResolution::Supported(v) => Resolution::Value(v),
                ValueResolution::Unsupported => Resolution::Unsupported,
            },
            property => Resolution::Property(property),
        }
    }

    // Every candidate is written, with no early exit and no rollback. If the unprefixed
    // write is rejected, an earlier accepted prefixed value is what gets reported.
    fn probe_last_write_wins(&self, key: &PropertyName, value: &str) -> String {
        let mut probe = self.surface.create_probe();
        for prefix in VALUE_PREFIXES {
            let candidate = format!("{}{}", prefix, value);
            debug!(key = %key, candidate, "probe write");
            probe.assign(key.as_str(), &candidate);
        }
        probe.read(key.as_str())
    }

    fn probe_isolated(&self, key: &PropertyName, value: &str) -> String {
        for prefix in VALUE_PREFIXES.iter().rev() {
            let candidate = format!("{}{}", prefix, value);
            let mut probe = self.surface.create_probe();
            probe.assign(key.as_str(), &candidate);
            let reported = probe.read(key.as_str());
            debug!(key = %key, candidate, reported, "isolated probe");
            if !reported.is_empty() {
                return reported;
            }
        }
        String::new()
    }
}
