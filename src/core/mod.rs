pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use error::{ErrorKind, KubeAiError, Result};
pub use types::{ContainerImage, Entity, Intent, PodImageRecord, PodStatusRecord, QueryResult};
