use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// How a read treats a 401 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Resolve to `None`, so views can render before auth state is known.
    ReturnNull,
    /// Fail like any other HTTP error.
    #[default]
    Throw,
}

impl UnauthorizedPolicy {
    /// Applies the policy to the outcome of a read.
    pub fn resolve<T>(self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self == Self::ReturnNull && e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// HTTP gateway to the Plugmin backend.
///
/// Every request carries the session cookies held in the client's jar.
/// Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    origin: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_session(config, None)
    }

    /// Builds a client whose jar is seeded with a previously exported
    /// `Cookie` header value.
    pub fn with_session(config: &ClientConfig, session_cookie: Option<&str>) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let origin = Url::parse(&format!("{base_url}/"))
            .map_err(|e| Error::Config(format!("invalid server URL {base_url}: {e}")))?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = session_cookie {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(&format!("{pair}; Path=/"), &origin);
            }
        }

        let mut builder = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            origin,
            jar,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session cookies as a `Cookie` header value, for persisting
    /// the session across processes.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response> {
        let resp = builder.send().await.inspect_err(|e| {
            tracing::warn!("{method} {path} failed: {e}");
        })?;
        tracing::debug!("{} {} {}", method, path, resp.status().as_u16());
        Ok(resp)
    }

    /// Issues `method path`, sending `body` as JSON when present, and returns
    /// the parsed response body (`null` when empty).
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let mut builder = self.builder(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = self.execute(method, path, builder).await?;
        let resp = error_for_status(resp).await?;
        parse_body(resp).await
    }

    /// Uncached read with an explicit 401 policy. Returns the unwrapped
    /// payload. [`Session`](crate::session::Session) applies the same policy
    /// on top of its query cache.
    pub async fn query<T: DeserializeOwned>(
        &self,
        path: &str,
        on401: UnauthorizedPolicy,
    ) -> Result<Option<T>> {
        let result = self.request(Method::GET, path, None::<&()>).await;
        let Some(body) = on401.resolve(result)? else {
            tracing::debug!("GET {path} unauthenticated, returning null");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(unwrap_envelope(body))?))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.typed(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.typed(Method::POST, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.typed(Method::PATCH, path, Some(body)).await
    }

    /// Deletes and returns the acknowledgement body (`null` when empty).
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.typed(Method::DELETE, path, None::<&()>).await
    }

    async fn typed<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let value = self.request(method, path, body).await?;
        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }
}

/// Turns a non-success response into `Error::Http`, with the body text (or
/// the status text when the body is empty) as the message.
async fn error_for_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let body = if text.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        text
    };
    Err(Error::Http { status, body })
}

async fn parse_body(resp: Response) -> Result<Value> {
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// Strips the optional `{status, data, message}` wrapper.
pub(crate) fn unwrap_envelope(value: Value) -> Value {
    let is_envelope = value.as_object().is_some_and(|obj| {
        obj.contains_key("data")
            && obj
                .keys()
                .all(|k| matches!(k.as_str(), "status" | "data" | "message"))
    });
    match value {
        Value::Object(mut obj) if is_envelope => obj.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}
