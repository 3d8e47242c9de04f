//! A style environment described by a capability profile.

pub mod grammar;
pub mod probe;
pub mod profile;

pub use grammar::{ValueGrammar, ValueType};
pub use probe::ProbeStyle;
pub use profile::{style_key, Profile};
