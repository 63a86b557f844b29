#![warn(clippy::pedantic)]

pub mod message;
pub mod message_kind;
pub mod value;

pub use message::{GenericMessage, MessageStream};
pub use message_kind::kind_name;
pub use value::GenericValue;
