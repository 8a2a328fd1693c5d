//! Turn typed query results into user-facing text
//!
//! Image listings are rendered locally, one line per container. Everything
//! else is serialized to JSON and handed to the language collaborator.

use crate::core::error::Result;
use crate::core::types::{PodImageRecord, QueryResult};
use crate::llm::client::LanguageModel;
use crate::llm::summarizer::summarize;

/// Reply used when an image listing yields no lines
pub const NO_IMAGES_FOUND: &str = "No images found in the listed pods.";

/// Compose the reply for `result`
///
/// Only the status path talks to `model`; image listings never do, even
/// when empty.
pub async fn compose_response(
    model: &dyn LanguageModel,
    result: &QueryResult,
) -> Result<String> {
    match result {
        QueryResult::PodImages(records) => Ok(compose_image_summary(records)),
        QueryResult::PodStatus(_) => {
            let payload = serde_json::to_string_pretty(result)?;
            summarize(model, &payload).await
        }
    }
}

/// One line per container, in pod order then pod spec order
pub fn compose_image_summary(records: &[PodImageRecord]) -> String {
    let lines: Vec<String> = records
        .iter()
        .flat_map(|pod| {
            pod.containers.iter().map(move |container| {
                format!(
                    "Pod {} (namespace {}): container {} uses image {}",
                    pod.name, pod.namespace, container.name, container.image
                )
            })
        })
        .collect();

    if lines.is_empty() {
        NO_IMAGES_FOUND.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::KubeAiError;
    use crate::core::types::{ContainerImage, PodStatusRecord};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        calls: AtomicUsize,
        last_user: Mutex<String>,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, _system: &str, user: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user.lock().unwrap() = user.to_string();
            Ok("No resources found.".into())
        }
    }

    fn image_pod(name: &str, namespace: &str, containers: &[(&str, &str)]) -> PodImageRecord {
        PodImageRecord {
            name: name.into(),
            namespace: namespace.into(),
            containers: containers
                .iter()
                .map(|(name, image)| ContainerImage {
                    name: name.to_string(),
                    image: image.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_container_line() {
        let records = vec![image_pod("nginx", "prod", &[("web", "nginx:1.14.2")])];
        assert_eq!(
            compose_image_summary(&records),
            "Pod nginx (namespace prod): container web uses image nginx:1.14.2"
        );
    }

    #[test]
    fn test_lines_follow_pod_then_container_order() {
        let records = vec![
            image_pod("a", "ns", &[("a1", "img:1"), ("a2", "img:2")]),
            image_pod("empty", "ns", &[]),
            image_pod("b", "ns", &[("b1", "img:3")]),
        ];
        let summary = compose_image_summary(&records);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("container a1"));
        assert!(lines[1].contains("container a2"));
        assert!(lines[2].starts_with("Pod b "));
    }

    #[test]
    fn test_empty_input_uses_fallback() {
        assert_eq!(compose_image_summary(&[]), NO_IMAGES_FOUND);
    }

    #[test]
    fn test_pods_without_containers_use_fallback() {
        let records = vec![image_pod("a", "ns", &[]), image_pod("b", "ns", &[])];
        assert_eq!(compose_image_summary(&records), NO_IMAGES_FOUND);
    }

    #[tokio::test]
    async fn test_image_results_never_call_the_model() {
        let model = RecordingModel::default();
        let reply = compose_response(&model, &QueryResult::PodImages(Vec::new()))
            .await
            .unwrap();
        assert_eq!(reply, NO_IMAGES_FOUND);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_status_results_are_summarized() {
        let model = RecordingModel::default();
        let result = QueryResult::PodStatus(vec![PodStatusRecord {
            name: "nginx".into(),
            namespace: "default".into(),
            status: "Running".into(),
            restarts: 2,
            containers: vec![ContainerImage {
                name: "nginx".into(),
                image: "nginx:1.14.2".into(),
            }],
        }]);

        let reply = compose_response(&model, &result).await.unwrap();
        assert_eq!(reply, "No resources found.");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        let user = model.last_user.lock().unwrap().clone();
        let payload: serde_json::Value =
            serde_json::from_str(user.trim_start_matches("Data:\n")).unwrap();
        assert_eq!(payload[0]["name"], "nginx");
        assert_eq!(payload[0]["restarts"], 2);
        assert_eq!(payload[0]["containers"][0]["image"], "nginx:1.14.2");
    }

    #[tokio::test]
    async fn test_empty_status_results_still_go_to_the_model() {
        let model = RecordingModel::default();
        compose_response(&model, &QueryResult::PodStatus(Vec::new()))
            .await
            .unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(model.last_user.lock().unwrap().as_str(), "Data:\n[]");
    }

    #[tokio::test]
    async fn test_model_failure_is_surfaced() {
        struct Down;

        #[async_trait]
        impl LanguageModel for Down {
            async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
                Err(KubeAiError::Llm("quota exceeded".into()))
            }
        }

        let err = compose_response(&Down, &QueryResult::PodStatus(Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, KubeAiError::Llm(ref m) if m == "quota exceeded"));
    }

    proptest! {
        #[test]
        fn prop_line_count_is_total_containers(
            counts in prop::collection::vec(0usize..5, 0..6),
        ) {
            let records: Vec<PodImageRecord> = counts
                .iter()
                .enumerate()
                .map(|(i, &n)| PodImageRecord {
                    name: format!("pod-{}", i),
                    namespace: "ns".into(),
                    containers: (0..n)
                        .map(|c| ContainerImage {
                            name: format!("c{}", c),
                            image: format!("img:{}", c),
                        })
                        .collect(),
                })
                .collect();

            let summary = compose_image_summary(&records);
            let total: usize = counts.iter().sum();
            if total == 0 {
                prop_assert_eq!(summary, NO_IMAGES_FOUND);
            } else {
                let lines: Vec<&str> = summary.lines().collect();
                prop_assert_eq!(lines.len(), total);

                let expected: Vec<String> = records
                    .iter()
                    .flat_map(|pod| pod.containers.iter().map(move |c| {
                        format!("Pod {} (namespace ns): container {} uses image {}", pod.name, c.name, c.image)
                    }))
                    .collect();
                prop_assert_eq!(lines, expected.iter().map(String::as_str).collect::<Vec<_>>());
            }
        }
    }
}
