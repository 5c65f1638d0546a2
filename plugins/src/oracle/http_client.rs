use serde::{Deserialize, Serialize};
use thiserror::Error;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Oracle call failures, split by what the caller can do about them.
#[derive(Debug, Error)]
pub enum OracleHttpError {
    #[error("oracle at {url} did not answer in time")]
    Timeout { url: String },

    #[error("oracle at {url} rejected the credentials (status {status}); check oracle.api_key")]
    Auth { status: u16, url: String },

    #[error("oracle at {url} answered status {status}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("oracle at {url} is unreachable: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("oracle reply is not usable: {reason} | body={body}")]
    Unparsable { reason: String, body: String },

    #[error("oracle reply carries no completion text")]
    Empty,
}

impl OracleHttpError {
    /// Short tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Auth { .. } => "auth",
            Self::Status { .. } => "status",
            Self::Transport { .. } => "transport",
            Self::Unparsable { .. } => "unparsable",
            Self::Empty => "empty",
        }
    }

    /// Failures that will repeat on every call until configuration changes.
    pub fn is_config_problem(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    fn from_reqwest(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }

    fn from_status(status: u16, url: &str, body: &str) -> Self {
        match status {
            401 | 403 => Self::Auth {
                status,
                url: url.to_string(),
            },
            _ => Self::Status {
                status,
                url: url.to_string(),
                body: preview_body(body),
            },
        }
    }

    pub fn unparsable(reason: impl Into<String>, body: &str) -> Self {
        Self::Unparsable {
            reason: reason.into(),
            body: preview_body(body),
        }
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Minimal client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct HttpClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
    url_complete: String,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            api_key,
            model,
            http,
            url_complete: format!("{}/v1/chat/completions", normalized),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    /// Send one user prompt and return the first choice's text.
    pub async fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        let url = &self.url_complete;
        tracing::debug!(
            target: "alchemist.oracle",
            stage = "oracle.http.complete.in",
            url = %url,
            model = %self.model,
            prompt_len = prompt.len()
        );
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
        };
        let req = self.http.post(url).json(&body);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| OracleHttpError::from_reqwest(err, url))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| OracleHttpError::from_reqwest(err, url))?;

        if !status.is_success() {
            return Err(OracleHttpError::from_status(status.as_u16(), url, &text).into());
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|err| OracleHttpError::unparsable(err.to_string(), &text))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(OracleHttpError::Empty)?;

        tracing::debug!(
            target: "alchemist.oracle",
            stage = "oracle.http.complete.out",
            status = %status,
            content_len = content.len()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn reply(content: &str) -> String {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
    }

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), BODY_PREVIEW_LIMIT + 3);
        assert!(!preview_body(&"b".repeat(BODY_PREVIEW_LIMIT)).ends_with("..."));
    }

    #[test]
    fn test_status_classification() {
        let url = "https://example.com/v1/chat/completions";
        let err = OracleHttpError::from_status(429, url, "rate limited");
        assert_eq!(err.kind(), "status");
        assert!(!err.is_config_problem());
        let msg = err.to_string();
        assert!(msg.contains("status 429"));
        assert!(msg.contains(url));
        assert!(msg.contains("rate limited"));

        let err = OracleHttpError::from_status(401, url, "");
        assert_eq!(err.kind(), "auth");
        assert!(err.is_config_problem());
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::PartialJson(json!({"model": "gpt-4o-mini"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply("{\"ok\": true}"))
            .create_async()
            .await;

        let client = HttpClient::new(
            server.url(),
            "secret-token".to_string(),
            "gpt-4o-mini".to_string(),
            1_000,
        )
        .unwrap();
        let text = client.complete("sys", "hello").await.unwrap();
        assert_eq!(text, "{\"ok\": true}");
    }

    #[tokio::test]
    async fn test_auth_header_absent_when_api_key_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(reply("hi"))
            .create_async()
            .await;

        let client =
            HttpClient::new(server.url(), "".to_string(), "m".to_string(), 1_000).unwrap();
        assert_eq!(client.complete("sys", "hello").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_status_failure_is_classified() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), "k".to_string(), "m".to_string(), 1_000).unwrap();
        let err = client.complete("sys", "hello").await.unwrap_err();
        let http = err.downcast_ref::<OracleHttpError>().unwrap();
        assert!(matches!(http, OracleHttpError::Status { status: 500, .. }));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_kind() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(json!({"choices": []}).to_string())
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), "k".to_string(), "m".to_string(), 1_000).unwrap();
        let err = client.complete("sys", "hello").await.unwrap_err();
        let http = err.downcast_ref::<OracleHttpError>().unwrap();
        assert!(matches!(http, OracleHttpError::Empty));
    }

    #[tokio::test]
    async fn test_rejected_key_is_auth() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), "bad".to_string(), "m".to_string(), 1_000).unwrap();
        let err = client.complete("sys", "hello").await.unwrap_err();
        let http = err.downcast_ref::<OracleHttpError>().unwrap();
        assert_eq!(http.kind(), "auth");
    }

    #[tokio::test]
    async fn test_non_chat_body_is_unparsable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), "k".to_string(), "m".to_string(), 1_000).unwrap();
        let err = client.complete("sys", "hello").await.unwrap_err();
        let http = err.downcast_ref::<OracleHttpError>().unwrap();
        assert_eq!(http.kind(), "unparsable");
        assert!(err.to_string().contains("<html>gateway</html>"));
    }
}
