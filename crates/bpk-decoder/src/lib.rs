#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod value_reader;

pub use config::DecoderConfig;
pub use decoder::{BlazorPackDecoder, DecodedStream, MessageError};
pub use error::DecodeError;
pub use value_reader::{ValueReader, decode_value};
