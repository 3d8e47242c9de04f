use std::fmt;

/// A browser engine that historically shipped experimental properties under its own prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vendor {
    Webkit,
    Moz,
    Ms,
    O,
}

impl Vendor {
    /// The prefix as it appears in style object keys, e.g. `Webkit` in `WebkitTransform`.
    pub fn camel_prefix(self) -> &'static str {
        match self {
            Vendor::Webkit => "Webkit",
            Vendor::Moz => "Moz",
            Vendor::Ms => "ms",
            Vendor::O => "O",
        }
    }

    /// The prefix as it appears in stylesheets, e.g. `-webkit-`.
    pub fn hyphen_prefix(self) -> &'static str {
        match self {
            Vendor::Webkit => "-webkit-",
            Vendor::Moz => "-moz-",
            Vendor::Ms => "-ms-",
            Vendor::O => "-o-",
        }
    }

    /// Finds the vendor whose hyphen prefix starts `name`, returning the remainder.
    pub fn strip_hyphen_prefix(name: &str) -> Option<(Vendor, &str)> {
        PREFIX_TABLE
            .iter()
            .find_map(|v| name.strip_prefix(v.hyphen_prefix()).map(|rest| (v, rest)))
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.camel_prefix())
    }
}

/// Ordered vendor table. Lookups walk it front to back and the first hit wins.
#[derive(Debug)]
pub struct PrefixTable {
    entries: [Vendor; 4],
}

impl PrefixTable {
    pub fn iter(&self) -> impl Iterator<Item = Vendor> + '_ {
        self.entries.iter().copied()
    }
}

pub static PREFIX_TABLE: PrefixTable = PrefixTable {
    entries: [Vendor::Webkit, Vendor::Moz, Vendor::Ms, Vendor::O],
};

/// Value prefixes in write order. The unprefixed form goes last so it gets the final say.
pub const VALUE_PREFIXES: [&str; 5] = ["-o-", "-ms-", "-moz-", "-webkit-", ""];
