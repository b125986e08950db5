use crate::config::Config;
use crate::host::{
    ActionReply, DocRef, Document, HostAction, HostActions, HostError, MediaSource,
};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Body of `/api/method/*` responses
#[derive(Debug, Deserialize)]
struct MethodResponse {
    #[serde(default)]
    message: Value,
    #[serde(rename = "_server_messages", default)]
    server_messages: Option<String>,
}

/// Body of `/api/resource/{doctype}/{name}` responses
#[derive(Debug, Deserialize)]
struct ResourceResponse {
    data: Option<Value>,
}

/// HTTP client for the host site's document API
#[derive(Clone)]
pub struct DocClient {
    client: Client,
    site_url: Url,
    auth: Option<String>,
}

impl DocClient {
    pub fn new(
        site_url: &str,
        api_key: Option<&str>,
        api_secret: Option<&str>,
    ) -> Result<Self, HostError> {
        // Keep a trailing slash so relative joins stay under the site path
        let normalized = if site_url.ends_with('/') {
            site_url.to_string()
        } else {
            format!("{}/", site_url)
        };
        let site_url =
            Url::parse(&normalized).map_err(|e| HostError::InvalidUrl(format!("{}: {}", site_url, e)))?;

        let auth = match (api_key, api_secret) {
            (Some(key), Some(secret)) => Some(format!("token {}:{}", key, secret)),
            _ => None,
        };

        Ok(Self {
            client: Client::new(),
            site_url,
            auth,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, HostError> {
        Self::new(
            &config.site_url,
            config.api_key.as_deref(),
            config.api_secret.as_deref(),
        )
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, HostError> {
        self.site_url
            .join(path)
            .map_err(|e| HostError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => request.header("Authorization", auth),
            None => request,
        }
    }

    /// Turn a site-relative file path into an absolute URL; absolute URLs pass through.
    /// Blank paths are returned untouched so the playlist still drops them.
    pub fn resolve_media_url(&self, raw: &str) -> String {
        if raw.trim().is_empty() || Url::parse(raw).is_ok() {
            return raw.to_string();
        }
        self.site_url
            .join(raw)
            .map(String::from)
            .unwrap_or_else(|_| raw.to_string())
    }

    /// Call a whitelisted method on `doc`
    pub async fn call_method(&self, doc: &DocRef, method: &str) -> Result<ActionReply, HostError> {
        let url = self.endpoint("api/method/run_doc_method")?;
        let body = json!({
            "dt": doc.doctype.as_str(),
            "dn": doc.name,
            "method": method,
        });

        debug!("POST {} method={} doc={}", url, method, doc);

        let response = self
            .authorize(self.client.post(url))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HostError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: MethodResponse = if text.trim().is_empty() {
            MethodResponse {
                message: Value::Null,
                server_messages: None,
            }
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ActionReply {
            value: parsed.message,
            messages: parsed
                .server_messages
                .as_deref()
                .map(decode_server_messages)
                .unwrap_or_default(),
        })
    }

    /// Fetch a document's fields
    pub async fn get_document(&self, doc: &DocRef) -> Result<Document, HostError> {
        let path = format!(
            "api/resource/{}/{}",
            urlencoding::encode(doc.doctype.as_str()),
            urlencoding::encode(&doc.name)
        );
        let url = self.endpoint(&path)?;

        debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HostError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ResourceResponse = response.json().await?;
        match parsed.data {
            Some(Value::Object(fields)) => Ok(Document::new(doc.clone(), fields)),
            _ => Err(HostError::MissingField("data")),
        }
    }
}

/// Decode `_server_messages`: a JSON string holding an array of JSON-encoded
/// message objects. Entries that are not valid objects fall back to their raw
/// text; anything unreadable is skipped.
pub fn decode_server_messages(raw: &str) -> Vec<String> {
    let Ok(entries) = serde_json::from_str::<Vec<String>>(raw) else {
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_str::<Value>(&entry) {
            Ok(Value::Object(obj)) => obj
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            Ok(Value::String(text)) => Some(text),
            Ok(_) => None,
            Err(_) => Some(entry),
        })
        .filter(|message| !message.trim().is_empty())
        .collect()
}

#[async_trait::async_trait]
impl HostActions for DocClient {
    async fn invoke(&self, doc: &DocRef, action: HostAction) -> Result<ActionReply, HostError> {
        let reply = self.call_method(doc, action.method()).await?;
        info!("{} on {} succeeded", action.method(), doc);
        Ok(reply)
    }

    async fn reload(&self, doc: &DocRef) -> Result<Document, HostError> {
        self.get_document(doc).await
    }
}

/// Media source backed by a session document's recorded videos
#[derive(Clone)]
pub struct SessionMediaSource {
    client: DocClient,
    doc: DocRef,
}

impl SessionMediaSource {
    pub fn new(client: DocClient, doc: DocRef) -> Self {
        Self { client, doc }
    }
}

#[async_trait::async_trait]
impl MediaSource for SessionMediaSource {
    async fn list_media_urls(&self) -> Result<Value, HostError> {
        let reply = self
            .client
            .call_method(&self.doc, HostAction::ListRecordedVideos.method())
            .await?;

        // Only well-formed string entries are rewritten; validation is the player's job
        Ok(match reply.value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(path) => Value::String(self.client.resolve_media_url(&path)),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        })
    }
}
