#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;
pub mod error;
pub mod parse;
pub mod render_json;
pub mod render_minimal;

pub use config::{BinaryEncoding, OutputMode, RenderConfig};
pub use driver::{DefaultRenderer, StreamRenderer};
pub use error::RenderError;
pub use parse::{parse_messages, parse_messages_with};
