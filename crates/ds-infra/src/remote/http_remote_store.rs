//! HTTP adapter for the remote draft endpoints.
//!
//! `push_draft` is an idempotent partial update (PATCH) carrying the full
//! snapshot; `fetch_last_step` reads the persisted wizard position. Every
//! request runs under the engine's bounded timeout, and transport failures
//! are classified into connectivity-class errors while HTTP-level rejections
//! become non-retryable `Rejected` errors.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ds_core::editor::EditorSnapshot;
use ds_core::ids::{ProjectId, StepId};
use ds_core::ports::{RemoteStoreError, RemoteStorePort};

pub struct HttpRemoteStore {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftPatchBody<'a> {
    #[serde(flatten)]
    draft: &'a EditorSnapshot,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDraftView {
    #[serde(default)]
    last_edited_step: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build remote store HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms: timeout.as_millis() as u64,
        })
    }

    fn draft_url(&self, project_id: &ProjectId) -> String {
        format!("{}/projects/{}/draft", self.base_url, project_id)
    }

    fn project_url(&self, project_id: &ProjectId) -> String {
        format!("{}/projects/{}", self.base_url, project_id)
    }

    fn classify_transport(&self, err: reqwest::Error) -> RemoteStoreError {
        if err.is_timeout() {
            RemoteStoreError::Timeout(self.timeout_ms)
        } else {
            RemoteStoreError::Unreachable(err.to_string())
        }
    }

    async fn rejection(response: reqwest::Response) -> RemoteStoreError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        RemoteStoreError::Rejected { status, message }
    }
}

#[async_trait]
impl RemoteStorePort for HttpRemoteStore {
    async fn push_draft(
        &self,
        project_id: &ProjectId,
        draft: &EditorSnapshot,
    ) -> Result<(), RemoteStoreError> {
        let body = DraftPatchBody {
            draft,
            updated_at: Utc::now(),
        };

        let response = self
            .client
            .patch(self.draft_url(project_id))
            .json(&body)
            .send()
            .await
            .map_err(|err| self.classify_transport(err))?;

        if response.status().is_success() {
            debug!(project = %project_id, "remote draft accepted");
            return Ok(());
        }

        Err(Self::rejection(response).await)
    }

    async fn fetch_last_step(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<StepId>, RemoteStoreError> {
        let response = self
            .client
            .get(self.project_url(project_id))
            .send()
            .await
            .map_err(|err| self.classify_transport(err))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let status = response.status().as_u16();
        let view: ProjectDraftView =
            response
                .json()
                .await
                .map_err(|err| RemoteStoreError::Rejected {
                    status,
                    message: format!("malformed response body: {err}"),
                })?;

        Ok(view.last_edited_step.map(StepId::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpRemoteStore {
        HttpRemoteStore::new(
            "https://api.example.test/v1/",
            Duration::from_millis(10_000),
        )
        .expect("build store")
    }

    #[test]
    fn urls_are_project_scoped_without_double_slashes() {
        let store = store();
        let project_id = ProjectId::from("p1");

        assert_eq!(
            store.draft_url(&project_id),
            "https://api.example.test/v1/projects/p1/draft"
        );
        assert_eq!(
            store.project_url(&project_id),
            "https://api.example.test/v1/projects/p1"
        );
    }

    #[test]
    fn patch_body_flattens_the_snapshot() {
        let draft = EditorSnapshot {
            last_edited_step: Some(StepId::from("canvas")),
            ..Default::default()
        };
        let body = DraftPatchBody {
            draft: &draft,
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&body).expect("serialize body");
        assert_eq!(value["lastEditedStep"], "canvas");
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("canvasDecorations").is_some());
    }

    #[test]
    fn view_parses_with_and_without_a_step() {
        let with: ProjectDraftView =
            serde_json::from_str(r#"{"lastEditedStep": "logo", "name": "Spring window"}"#)
                .expect("parse view");
        assert_eq!(with.last_edited_step.as_deref(), Some("logo"));

        let without: ProjectDraftView =
            serde_json::from_str(r#"{"name": "Spring window"}"#).expect("parse view");
        assert!(without.last_edited_step.is_none());
    }
}
