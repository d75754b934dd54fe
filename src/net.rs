// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON REST plumbing shared by the platform clients.
//!
//! ```text
//! ApiClient::new(base_url, Auth)
//!   .get_json::<T>("/repos/o/r")
//!   .post_json::<B, T>("/user/repos", &body)
//!        |
//!        v
//!   global reqwest Client (pool, keep-alive, UA pushguardian/<ver>)
//!        |
//!   2xx --> serde_json decode
//!   else --> NetworkError::HttpError { status, url (error: body) }
//! ```

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{GuardError, GuardResult, NetworkError};

/// Global HTTP client, initialized once and reused by every platform client.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("pushguardian/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// How requests authenticate.
#[derive(Clone)]
pub enum Auth {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// A single custom header such as `PRIVATE-TOKEN`.
    Header { name: &'static str, value: String },
    /// HTTP basic authentication.
    Basic { username: String, password: String },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
            Self::Header { name, .. } => write!(f, "Header({name}: ***)"),
            Self::Basic { username, .. } => write!(f, "Basic({username}:***)"),
        }
    }
}

/// Authenticated JSON client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
    accept: Option<&'static str>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Self {
        Self {
            client: global_client().clone(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            accept: None,
        }
    }

    /// Sets the `Accept` header sent with every request.
    #[must_use]
    pub const fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` (which starts with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        request = match &self.auth {
            Auth::Bearer(token) => request.bearer_auth(token),
            Auth::Header { name, value } => request.header(*name, value),
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
        };
        if let Some(accept) = self.accept {
            request = request.header("Accept", accept);
        }
        request
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::HttpError` on non-2xx status and
    /// `NetworkError::Reqwest` on transport or decoding failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GuardResult<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.request(Method::GET, &url).send().await?;
        Self::decode(response, &url).await
    }

    /// `POST path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::HttpError` on non-2xx status and
    /// `NetworkError::Reqwest` on transport or decoding failures.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> GuardResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self.request(Method::POST, &url).json(body).send().await?;
        Self::decode(response, &url).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> GuardResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: format!("{url} (error: {})", body.trim()),
            }
            .into());
        }
        Ok(response.json::<T>().await?)
    }
}

/// Whether `err` is an HTTP 404 answer.
#[must_use]
pub fn is_not_found(err: &GuardError) -> bool {
    matches!(err, GuardError::Network(inner) if inner.status() == Some(404))
}

/// Percent-encode one URL path segment or query value.
#[must_use]
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("my-org/repo a"), "my-org%2Frepo%20a");
        assert_eq!(encode_component("plain_1.0~x"), "plain_1.0~x");
        assert_eq!(encode_component("Équipe"), "%C3%89quipe");
    }

    #[test]
    fn test_auth_debug_hides_secrets() {
        let auth = Auth::Basic {
            username: "me".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(format!("{auth:?}"), "Basic(me:***)");
        assert!(!format!("{:?}", Auth::Bearer("tok".to_string())).contains("tok"));
    }

    #[tokio::test]
    async fn test_get_json_sends_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/1"))
            .and(header("PRIVATE-TOKEN", "glpat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(
            format!("{}/", server.uri()),
            Auth::Header {
                name: "PRIVATE-TOKEN",
                value: "glpat".to_string(),
            },
        );
        let body: Value = client.get_json("/projects/1").await.unwrap();
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_post_json_maps_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .and(body_json(json!({"name": "x"})))
            .respond_with(ResponseTemplate::new(422).set_body_string("name already exists"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Auth::Bearer("t".to_string()));
        let err = client
            .post_json::<_, Value>("/user/repos", &json!({"name": "x"}))
            .await
            .unwrap_err();
        match &err {
            GuardError::Network(inner) => {
                assert_eq!(inner.status(), Some(422));
                assert!(inner.to_string().contains("name already exists"));
            }
            other => panic!("expected network error, got {other:?}"),
        }
        assert!(!is_not_found(&err));
    }

    #[tokio::test]
    async fn test_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), Auth::Bearer("t".to_string()));
        let err = client.get_json::<Value>("/repos/a/b").await.unwrap_err();
        assert!(is_not_found(&err));
    }
}
