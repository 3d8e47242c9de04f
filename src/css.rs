pub mod color;
pub mod component;
pub mod token;

pub use color::{parse_color, Color, Rgba};
pub use component::{parse_value, serialize_values, ComponentValue, Recovery};
pub use token::{tokenize_css, CssToken};
