#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod value_writer;

pub use encoder::BlazorPackEncoder;
pub use error::EncodeError;
