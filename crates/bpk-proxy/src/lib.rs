#![warn(clippy::pedantic)]

pub mod annotations;
pub mod config;
pub mod error;
pub mod inspector;
pub mod request;

pub use annotations::{Annotations, HighlightColor};
pub use config::InspectorConfig;
pub use error::InspectError;
pub use inspector::{BlazorInspector, Outcome, ReceivedAction, SkipReason};
pub use request::{ContentType, InterceptedRequest};
