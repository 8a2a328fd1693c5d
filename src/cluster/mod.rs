//! Cluster query collaborator

pub mod client;
pub mod types;

pub use client::{ClusterApi, ClusterConnector, KubeClient, KubeConnector};
pub use types::{Container, ContainerStatus, ObjectMeta, Pod, PodSpec, PodStatus};
