use std::fmt;
use std::str::FromStr;

use crate::prefix::Vendor;
use crate::utils::{capitalize, to_camel_case};
use crate::{Error, Result};

/// A hyphenated style property name such as `user-select`. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyPropertyName);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key a style object uses for this property, e.g. `userSelect`.
    pub fn camel_key(&self) -> String {
        to_camel_case(&self.0)
    }

    /// The key a style object uses for the vendor form, e.g. `WebkitUserSelect`.
    pub fn prefixed_camel_key(&self, vendor: Vendor) -> String {
        format!("{}{}", vendor.camel_prefix(), capitalize(&self.camel_key()))
    }

    /// The stylesheet form with the vendor prefix, e.g. `-webkit-user-select`.
    pub fn prefixed(&self, vendor: Vendor) -> String {
        format!("{}{}", vendor.hyphen_prefix(), self.0)
    }
}

impl FromStr for PropertyName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The concrete property name an environment honors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyResolution {
    Native(String),
    Prefixed { vendor: Vendor, name: String },
    Unsupported,
}

impl PropertyResolution {
    pub fn is_supported(&self) -> bool {
        !matches!(self, PropertyResolution::Unsupported)
    }

    /// The resolved name, or `""` when unsupported.
    pub fn as_str(&self) -> &str {
        match self {
            PropertyResolution::Native(name) | PropertyResolution::Prefixed { name, .. } => name,
            PropertyResolution::Unsupported => "",
        }
    }
}

impl fmt::Display for PropertyResolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropertyResolution::Unsupported => write!(f, "unsupported"),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

/// The value an environment reports after probing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueResolution {
    Supported(String),
    Unsupported,
}

impl ValueResolution {
    pub fn is_supported(&self) -> bool {
        matches!(self, ValueResolution::Supported(_))
    }

    /// The reported value, or `""` when unsupported.
    pub fn as_str(&self) -> &str {
        match self {
            ValueResolution::Supported(value) => value,
            ValueResolution::Unsupported => "",
        }
    }
}

impl fmt::Display for ValueResolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueResolution::Supported(value) => write!(f, "{}", value),
            ValueResolution::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Outcome of the combined lookup; records which question was answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Property(PropertyResolution),
    Value(String),
    Unsupported,
}

impl Resolution {
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Property(property) => property.as_str(),
            Resolution::Value(value) => value,
            Resolution::Unsupported => "",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resolution::Property(property) => write!(f, "property: {}", property),
            Resolution::Value(value) => write!(f, "value: {}", value),
            Resolution::Unsupported => write!(f, "unsupported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_name_forms() {
        let name = PropertyName::new("user-select").unwrap();
        assert_eq!(name.as_str(), "user-select");
        assert_eq!(name.camel_key(), "userSelect");
        assert_eq!(name.prefixed_camel_key(Vendor::Webkit), "WebkitUserSelect");
        assert_eq!(name.prefixed_camel_key(Vendor::Ms), "msUserSelect");
        assert_eq!(name.prefixed(Vendor::Moz), "-moz-user-select");
    }

    #[test]
    fn property_name_is_trimmed() {
        let name: PropertyName = "  transform ".parse().unwrap();
        assert_eq!(name.to_string(), "transform");
    }

    #[test]
    #[should_panic]
    fn empty_property_name() {
        PropertyName::new("   ").unwrap();
    }

    #[test]
    fn unsupported_reads_as_empty() {
        assert_eq!(PropertyResolution::Unsupported.as_str(), "");
        assert_eq!(ValueResolution::Unsupported.as_str(), "");
        assert_eq!(Resolution::Unsupported.as_str(), "");
        assert!(!PropertyResolution::Unsupported.is_supported());
        assert!(PropertyResolution::Native("x".to_string()).is_supported());
        assert!(!ValueResolution::Unsupported.is_supported());
        assert!(ValueResolution::Supported("flex".to_string()).is_supported());
    }

    #[test]
    fn display() {
        let prefixed = PropertyResolution::Prefixed {
            vendor: Vendor::Webkit,
            name: "-webkit-transform".to_string(),
        };
        assert_eq!(prefixed.to_string(), "-webkit-transform");
        assert_eq!(
            Resolution::Property(prefixed).to_string(),
            "property: -webkit-transform"
        );
        assert_eq!(Resolution::Value("flex".to_string()).to_string(), "value: flex");
        assert_eq!(ValueResolution::Unsupported.to_string(), "unsupported");
    }
}
