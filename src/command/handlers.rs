//! Built-in intent handlers
//!
//! Each handler resolves its parameters, connects to the cluster, issues a
//! single list query and maps every returned pod to one record. Failures are
//! returned as-is; wrapping them is the executor's job.

use crate::cluster::{ClusterConnector, Pod};
use crate::command::params::{extract_parameters, NAMESPACE};
use crate::command::registry::CommandHandler;
use crate::core::error::Result;
use crate::core::types::{ContainerImage, Entity, PodImageRecord, PodStatusRecord, QueryResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Phase reported for pods whose status block carries none
const UNKNOWN_PHASE: &str = "Unknown";

/// `get_pod_status`: phase, restart totals and images per pod
pub struct PodStatusHandler {
    connector: Arc<dyn ClusterConnector>,
}

impl PodStatusHandler {
    pub fn new(connector: Arc<dyn ClusterConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl CommandHandler for PodStatusHandler {
    async fn handle(&self, entities: &[Entity]) -> Result<QueryResult> {
        let params = extract_parameters(entities, &[NAMESPACE])?;
        let namespace = params.require(NAMESPACE)?;

        let api = self.connector.connect()?;
        let pods = api.list_pods(namespace).await?;

        let records = pods
            .iter()
            .filter_map(|pod| pod_status_record(pod, namespace))
            .collect();
        Ok(QueryResult::PodStatus(records))
    }
}

/// `get_pod_images`: container images per pod, straight from the pod spec
pub struct PodImagesHandler {
    connector: Arc<dyn ClusterConnector>,
}

impl PodImagesHandler {
    pub fn new(connector: Arc<dyn ClusterConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl CommandHandler for PodImagesHandler {
    async fn handle(&self, entities: &[Entity]) -> Result<QueryResult> {
        let params = extract_parameters(entities, &[NAMESPACE])?;
        let namespace = params.require(NAMESPACE)?;

        let api = self.connector.connect()?;
        let pods = api.list_pods(namespace).await?;

        let records = pods
            .iter()
            .filter_map(|pod| pod_image_record(pod, namespace))
            .collect();
        Ok(QueryResult::PodImages(records))
    }
}

pub(crate) fn pod_status_record(pod: &Pod, queried_namespace: &str) -> Option<PodStatusRecord> {
    let (name, namespace) = identity(pod, queried_namespace)?;
    let statuses = pod.container_statuses();

    // Widened before summing: each count is an int32 on the wire
    let restarts = statuses
        .iter()
        .map(|status| u64::from(status.restart_count.unwrap_or(0)))
        .sum();

    // Images are only reported alongside container status data
    let containers = if statuses.is_empty() {
        Vec::new()
    } else {
        spec_containers(pod, &name)?
    };

    Some(PodStatusRecord {
        name,
        namespace,
        status: pod.phase().unwrap_or(UNKNOWN_PHASE).to_string(),
        restarts,
        containers,
    })
}

pub(crate) fn pod_image_record(pod: &Pod, queried_namespace: &str) -> Option<PodImageRecord> {
    let (name, namespace) = identity(pod, queried_namespace)?;
    let containers = spec_containers(pod, &name)?;
    Some(PodImageRecord {
        name,
        namespace,
        containers,
    })
}

/// Name and namespace, or `None` for a nameless descriptor
fn identity(pod: &Pod, queried_namespace: &str) -> Option<(String, String)> {
    let Some(name) = pod.metadata.name.clone() else {
        tracing::warn!(namespace = queried_namespace, "Skipping pod without a name");
        return None;
    };
    let namespace = pod
        .metadata
        .namespace
        .clone()
        .unwrap_or_else(|| queried_namespace.to_string());
    Some((name, namespace))
}

/// Spec containers in order, or `None` if any of them has no image
fn spec_containers(pod: &Pod, pod_name: &str) -> Option<Vec<ContainerImage>> {
    pod.containers()
        .iter()
        .map(|container| match &container.image {
            Some(image) => Some(ContainerImage {
                name: container.name.clone(),
                image: image.clone(),
            }),
            None => {
                tracing::warn!(
                    pod = pod_name,
                    container = %container.name,
                    "Skipping pod with an imageless container"
                );
                None
            }
        })
        .collect()
}
