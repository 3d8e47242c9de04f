use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use tracing::info;

use crate::host::grammar::{ValueGrammar, ValueType};
use crate::host::probe::ProbeStyle;
use crate::prefix::Vendor;
use crate::surface::StyleSurface;
use crate::utils::{capitalize, to_camel_case};
use crate::{Error, Result};

static BUILTIN_PROFILES: [(&str, &str); 5] = [
    ("modern", include_str!("../../profiles/modern.toml")),
    ("webkit-legacy", include_str!("../../profiles/webkit-legacy.toml")),
    ("gecko-legacy", include_str!("../../profiles/gecko-legacy.toml")),
    ("trident", include_str!("../../profiles/trident.toml")),
    ("presto", include_str!("../../profiles/presto.toml")),
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "property")]
    properties: Vec<PropertyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyEntry {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    functions: Vec<String>,
    #[serde(default)]
    types: Vec<ValueType>,
}

/// The style capabilities of one environment, e.g. one browser generation.
#[derive(Clone, Debug)]
pub struct Profile {
    name: String,
    description: String,
    grammars: Rc<BTreeMap<String, ValueGrammar>>,
    style_keys: HashSet<String>,
}

impl Profile {
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ProfileFile = toml::from_str(content)?;
        let name = file.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Profile("profile name is empty".to_string()));
        }

        let mut grammars = BTreeMap::new();
        for entry in file.properties {
            let property = entry.name.trim().to_ascii_lowercase();
            if property.is_empty() {
                return Err(Error::Profile(format!(
                    "{}: property with an empty name",
                    name
                )));
            }
            let grammar = ValueGrammar::new(&entry.keywords, &entry.functions, &entry.types);
            if grammar.is_empty() {
                return Err(Error::Profile(format!(
                    "{}: property `{}` accepts no values",
                    name, property
                )));
            }
            if grammars.insert(property.clone(), grammar).is_some() {
                return Err(Error::Profile(format!(
                    "{}: property `{}` is declared twice",
                    name, property
                )));
            }
        }

        let style_keys = grammars.keys().map(|p| style_key(p)).collect();
        Ok(Self {
            name,
            description: file.description,
            grammars: Rc::new(grammars),
            style_keys,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let profile = Self::from_toml(&fs::read_to_string(path)?)?;
        info!(
            profile = profile.name(),
            path = %path.display(),
            properties = profile.grammars.len(),
            "loaded profile"
        );
        Ok(profile)
    }

    pub fn builtin(name: &str) -> Result<Self> {
        let (_, content) = BUILTIN_PROFILES
            .iter()
            .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))?;
        Self::from_toml(content)
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_PROFILES.iter().map(|(name, _)| *name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hyphenated property names this environment knows, in sorted order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.grammars.keys().map(String::as_str)
    }
}

impl StyleSurface for Profile {
    type Probe = ProbeStyle;

    fn recognizes(&self, camel_key: &str) -> bool {
        self.style_keys.contains(camel_key)
    }

    fn create_probe(&self) -> ProbeStyle {
        ProbeStyle::new(Rc::clone(&self.grammars))
    }
}

/// The key a style object exposes for a hyphenated property.
/// `-webkit-user-select` is `WebkitUserSelect`, `-ms-flex` is `msFlex`.
pub fn style_key(property: &str) -> String {
    match Vendor::strip_hyphen_prefix(property) {
        Some((vendor, rest)) => format!(
            "{}{}",
            vendor.camel_prefix(),
            capitalize(&to_camel_case(rest))
        ),
        None => to_camel_case(property),
    }
}
