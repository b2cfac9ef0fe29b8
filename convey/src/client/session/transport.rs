//! The wire seam: [`Transport`] and its reqwest implementation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::client::Bot;
use crate::client::session::{RawResponse, RequestPayload};
use crate::enums::RequestType;
use crate::errors::ClientError;
use crate::types::InputFile;

/// Sends a prepared request and returns the raw response.
///
/// Tests swap in a mock implementation here; everything above this trait
/// (middleware, classification) runs unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one HTTP exchange.
    async fn make_request(
        &self,
        bot: &Bot,
        payload: RequestPayload,
    ) -> Result<RawResponse, ClientError>;

    /// Releases transport resources.
    async fn close(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Production transport over a shared [`reqwest::Client`].
#[derive(Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// A transport with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn make_request(
        &self,
        bot: &Bot,
        payload: RequestPayload,
    ) -> Result<RawResponse, ClientError> {
        let method_name = payload.method_name;
        let url = format!("{}{}", bot.base().trim_end_matches('/'), payload.path);

        let mut builder = match payload.request_type {
            RequestType::Get => self.client.get(&url).query(&flatten_query(&payload.data)),
            RequestType::Delete => self.client.delete(&url).query(&flatten_query(&payload.data)),
            RequestType::Post => self.client.post(&url).json(&payload.data),
            RequestType::Put => self.client.put(&url).json(&payload.data),
            RequestType::PostWithAttach => {
                let form = build_form(&payload).await?;
                self.client.post(&url).multipart(form)
            }
        };
        if let Some((login, password)) = bot.auth() {
            builder = builder.basic_auth(login, Some(password));
        }
        let response = builder
            .timeout(payload.timeout)
            .send()
            .await
            .map_err(|err| network_error(method_name, &err))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| network_error(method_name, &err))?;
        Ok(RawResponse { status, body })
    }
}

fn network_error(method: &'static str, err: &reqwest::Error) -> ClientError {
    let message = if err.is_timeout() {
        "Request timeout error".to_owned()
    } else {
        err.to_string()
    };
    ClientError::Network { method, message }
}

/// Renders top-level payload fields as query parameters, skipping nulls.
///
/// Strings go through unquoted; everything else keeps its JSON rendering.
fn flatten_query(data: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = data else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

/// Builds the multipart form: a JSON `meta` field plus one part per file.
async fn build_form(payload: &RequestPayload) -> Result<Form, ClientError> {
    let method_name = payload.method_name;
    let meta = prune_nulls(payload.data.clone());
    let meta_text = serde_json::to_string(&meta).map_err(|err| ClientError::Decode {
        message: format!("failed to serialize multipart meta: {err}"),
        data: String::new(),
    })?;
    let mut form = Form::new()
        .part("meta", Part::text(meta_text).mime_str("application/json").map_err(|err| {
            ClientError::Network { method: method_name, message: err.to_string() }
        })?);
    for file in &payload.files {
        form = form.part("file", file_part(method_name, file).await?);
    }
    Ok(form)
}

async fn file_part(method: &'static str, file: &InputFile) -> Result<Part, ClientError> {
    match file {
        InputFile::Buffered { file_name, data } => {
            Ok(Part::bytes(data.clone()).file_name(file_name.clone()))
        }
        InputFile::FsPath(path) => {
            let data = tokio::fs::read(path).await.map_err(|err| ClientError::Network {
                method,
                message: format!("failed to read {}: {err}", path.display()),
            })?;
            let mut part = Part::bytes(data);
            if let Some(name) = path.file_name() {
                part = part.file_name(name.to_string_lossy().into_owned());
            }
            Ok(part)
        }
    }
}

fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter().filter(|(_, value)| !value.is_null()).collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_skips_nulls_and_unquotes_strings() {
        let data = json!({
            "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "line_id": null,
            "limit": 10,
        });
        let mut query = flatten_query(&data);
        query.sort();
        assert_eq!(
            query,
            vec![
                ("limit".to_owned(), "10".to_owned()),
                ("user_id".to_owned(), "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned()),
            ]
        );
    }

    #[test]
    fn meta_drops_absent_fields() {
        let pruned = prune_nulls(json!({"text": "hi", "author_id": null}));
        assert_eq!(pruned, json!({"text": "hi"}));
    }
}
