//! Command execution pipeline
//!
//! Converts a recognized Intent into typed results and then into text:
//! Intent -> CommandExecutor -> CommandRegistry -> CommandHandler
//! (parameters, cluster query) -> QueryResult -> compose_response

pub mod executor;
pub mod handlers;
pub mod params;
pub mod registry;
pub mod response;

pub use executor::CommandExecutor;
pub use handlers::{PodImagesHandler, PodStatusHandler};
pub use params::{extract_parameters, Parameters, DEFAULT_NAMESPACE, NAMESPACE};
pub use registry::{
    CommandHandler, CommandRegistry, RegistryBuilder, GET_POD_IMAGES, GET_POD_STATUS,
};
pub use response::{compose_image_summary, compose_response, NO_IMAGES_FOUND};
