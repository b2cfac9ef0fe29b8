//! Shared test fixtures: a scripted transport and update builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use convey::client::{Bot, RawResponse, RequestPayload, Session, Transport};
use convey::errors::ClientError;
use convey::types::{TypeLine, Update};

/// Transport that replays scripted responses and records every request.
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    log: Arc<Mutex<Vec<RequestPayload>>>,
}

impl MockTransport {
    pub fn new(responses: impl IntoIterator<Item = (u16, &'static str)>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| RawResponse { status, body: body.to_owned() })
                    .collect(),
            ),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the request log, valid after the transport moves into a
    /// session.
    pub fn log(&self) -> Arc<Mutex<Vec<RequestPayload>>> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn make_request(
        &self,
        _bot: &Bot,
        payload: RequestPayload,
    ) -> Result<RawResponse, ClientError> {
        let method = payload.method_name;
        self.log.lock().unwrap().push(payload);
        self.responses.lock().unwrap().pop_front().ok_or_else(|| ClientError::Network {
            method,
            message: "no scripted response left".to_owned(),
        })
    }
}

/// A bot whose session runs over `transport`.
pub fn mock_bot(transport: MockTransport) -> Bot {
    Bot::new("login", "password").with_session(Session::new(transport))
}

/// A minimal chat payload for `line_id`/`user_id`.
pub fn line_payload(line_id: Uuid, user_id: Uuid) -> TypeLine {
    TypeLine {
        message_id: Uuid::new_v4(),
        message_type: 1,
        message_time: Utc::now(),
        treatment_id: None,
        author_id: None,
        line_id,
        user_id,
        text: Some("hello".to_owned()),
        file: None,
        call: None,
        rda: None,
        service_request: None,
        treatment: None,
        data: None,
        partner_notification: None,
    }
}

/// A full `line` update envelope.
pub fn line_update(line_id: Uuid, user_id: Uuid) -> Update {
    Update {
        event_type: "line".to_owned(),
        event_source: "bot".to_owned(),
        competence: None,
        line: Some(line_payload(line_id, user_id)),
        subscriber: None,
        subscription: None,
        support_line: None,
    }
}

/// An update that matches no known category.
pub fn empty_update() -> Update {
    Update {
        event_type: "mystery".to_owned(),
        event_source: "bot".to_owned(),
        competence: None,
        line: None,
        subscriber: None,
        subscription: None,
        support_line: None,
    }
}

/// A raw `subscriber` update as the platform would POST it, already
/// nested.
pub fn subscriber_update_json() -> serde_json::Value {
    json!({
        "event_type": "subscriber",
        "event_source": "line",
        "subscriber": {
            "action": "add",
            "user": {
                "user_id": Uuid::new_v4(),
                "name": "Ada",
                "surname": "Lovelace",
                "patronymic": "",
                "avatar_url": null,
                "avatar_small_url": null,
                "email": "ada@example.com",
                "post": "engineer",
                "phone": "+7",
            },
        },
    })
}
