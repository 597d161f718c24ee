//! AnkiConnect HTTP client
//!
//! Every action is a `POST` of `{"action", "version", "params"}` to the add-on
//! endpoint. The response carries either a `result` or an `error` string.

use super::models::{
    ApiRequest, ApiResponse, CardInfo, DayCount, NoteInfo, ReviewLogEntry, ReviewsByCard,
};
use super::service::StudyService;
use crate::config::AnkiConnectConfig;
use crate::domain::ids::{CardId, NoteId};
use crate::domain::{AnkiConnectError, KuraError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// HTTP implementation of [`StudyService`]
pub struct AnkiConnectClient {
    client: Client,
    config: AnkiConnectConfig,
}

impl AnkiConnectClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AnkiConnectConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                KuraError::Configuration(format!("Failed to build AnkiConnect HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Send one action and unwrap its result
    async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = ApiRequest {
            action,
            version: self.config.api_version,
            params,
        };

        tracing::debug!(action = %action, url = %self.config.url, "Invoking AnkiConnect action");

        let resp = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnkiConnectError::Timeout(format!("{action}: {e}"))
                } else {
                    AnkiConnectError::ConnectionFailed(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AnkiConnectError::HttpStatus {
                status: status.as_u16(),
                message: format!("{action}: {body}"),
            }
            .into());
        }

        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| AnkiConnectError::InvalidResponse(format!("{action}: {e}")))?;

        if let Some(message) = envelope.error {
            return Err(AnkiConnectError::ActionFailed {
                action: action.to_string(),
                message,
            }
            .into());
        }

        envelope.result.ok_or_else(|| {
            AnkiConnectError::InvalidResponse(format!("{action}: response carried no result"))
                .into()
        })
    }
}

#[async_trait]
impl StudyService for AnkiConnectClient {
    async fn find_cards(&self, query: &str) -> Result<Vec<CardId>> {
        self.invoke("findCards", Some(json!({ "query": query })))
            .await
    }

    async fn cards_info(&self, cards: &[CardId]) -> Result<Vec<CardInfo>> {
        self.invoke("cardsInfo", Some(json!({ "cards": cards })))
            .await
    }

    async fn notes_info(&self, notes: &[NoteId]) -> Result<Vec<NoteInfo>> {
        let entries: Vec<serde_json::Value> = self
            .invoke("notesInfo", Some(json!({ "notes": notes })))
            .await?;
        let requested = entries.len();
        let found = NoteInfo::from_entries(entries)
            .map_err(|e| AnkiConnectError::InvalidResponse(format!("notesInfo: {e}")))?;

        if found.len() < requested {
            tracing::debug!(
                requested,
                found = found.len(),
                "Skipped notesInfo placeholders for unknown notes"
            );
        }
        Ok(found)
    }

    async fn num_cards_reviewed_today(&self) -> Result<i64> {
        self.invoke("getNumCardsReviewedToday", None).await
    }

    async fn num_cards_reviewed_by_day(&self) -> Result<Vec<DayCount>> {
        self.invoke("getNumCardsReviewedByDay", None).await
    }

    async fn card_reviews(&self, deck: &str, start_id: i64) -> Result<Vec<ReviewLogEntry>> {
        self.invoke(
            "cardReviews",
            Some(json!({ "deck": deck, "startID": start_id })),
        )
        .await
    }

    async fn reviews_of_cards(&self, cards: &[CardId]) -> Result<ReviewsByCard> {
        self.invoke("getReviewsOfCards", Some(json!({ "cards": cards })))
            .await
    }

    fn endpoint(&self) -> &str {
        &self.config.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> AnkiConnectClient {
        AnkiConnectClient::new(AnkiConnectConfig {
            url: server.url(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_cards_sends_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Json(json!({
                "action": "findCards",
                "version": 6,
                "params": {"query": "deck:Japanese"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": [11, 12, 13], "error": null}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let ids = client.find_cards("deck:Japanese").await.unwrap();

        assert_eq!(ids, vec![CardId::new(11), CardId::new(12), CardId::new(13)]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_action_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": null, "error": "collection is not available"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.num_cards_reviewed_today().await.unwrap_err();

        match err {
            KuraError::AnkiConnect(AnkiConnectError::ActionFailed { action, message }) => {
                assert_eq!(action, "getNumCardsReviewedToday");
                assert_eq!(message, "collection is not available");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.find_cards("").await.unwrap_err();

        assert!(matches!(
            err,
            KuraError::AnkiConnect(AnkiConnectError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_card_reviews_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "action": "cardReviews",
                "params": {"deck": "", "startID": 0}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": [[1594194095746, 1485369733217, -1, 3, 4, -60, 2500, 6157, 0]], "error": null}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let log = client.card_reviews("", 0).await.unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].1, CardId::new(1485369733217));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_notes_info_skips_unknown_note_placeholder() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "action": "notesInfo",
                "params": {"notes": [1, 2]}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": [{"noteId": 1, "tags": ["a"]}, {}], "error": null}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let notes = client
            .notes_info(&[NoteId::new(1), NoteId::new(2)])
            .await
            .unwrap();

        assert_eq!(
            notes,
            vec![NoteInfo {
                note_id: NoteId::new(1),
                tags: vec!["a".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_notes_info_malformed_entry_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": [{"tags": ["a"]}], "error": null}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.notes_info(&[NoteId::new(1)]).await.unwrap_err();

        assert!(matches!(
            err,
            KuraError::AnkiConnect(AnkiConnectError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_envelope_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": 17}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(client.num_cards_reviewed_today().await.unwrap(), 17);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = AnkiConnectClient::new(AnkiConnectConfig {
            url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        })
        .unwrap();

        let err = client.find_cards("").await.unwrap_err();
        assert!(err.is_connection());
    }
}
