//! Signed HTTP client for the OVH API

use nimbus_cloud::{CloudError, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha1::{Digest, Sha1};
use tokio::sync::OnceCell;

/// Known endpoint aliases, mirroring the official client libraries.
const ENDPOINTS: &[(&str, &str)] = &[
    ("ovh-eu", "https://eu.api.ovh.com/1.0"),
    ("ovh-ca", "https://ca.api.ovh.com/1.0"),
    ("ovh-us", "https://api.us.ovhcloud.com/1.0"),
];

/// Credentials for a registered OVH application.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Endpoint alias (`ovh-eu`, `ovh-ca`, `ovh-us`) or a full
    /// `https://` base URL.
    pub endpoint: String,
    pub application_key: String,
    pub application_secret: String,
    pub consumer_key: String,
}

/// HTTP client holding the credential material and the one-time clock
/// drift against the API.
pub struct OvhClient {
    http: reqwest::Client,
    base_url: String,
    application_key: String,
    application_secret: String,
    consumer_key: String,
    /// Seconds to add to the local clock to match the API clock.
    /// Computed once per process from `GET /auth/time`.
    time_drift: OnceCell<i64>,
}

impl OvhClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let base_url = resolve_endpoint(&credentials.endpoint)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            application_key: credentials.application_key,
            application_secret: credentials.application_secret,
            consumer_key: credentials.consumer_key,
            time_drift: OnceCell::new(),
        })
    }

    /// Unsigned read of the API clock.
    pub(crate) async fn fetch_server_time(&self) -> Result<i64> {
        let url = format!("{}/auth/time", self.base_url);
        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        let payload = read_response(Method::GET, response).await?;
        payload.as_i64().ok_or_else(|| CloudError::ApiUnavailable {
            detail: format!("non-numeric server time: {payload}"),
            payload: Value::Null,
        })
    }

    async fn drift(&self) -> Result<i64> {
        self.time_drift
            .get_or_try_init(|| async {
                let server = self.fetch_server_time().await?;
                let drift = server - now_epoch();
                tracing::debug!(drift, "API clock drift computed");
                Ok::<i64, CloudError>(drift)
            })
            .await
            .copied()
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        self.send(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, &[], None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T> {
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            reqwest::Url::parse_with_params(&format!("{}{}", self.base_url, path), query)
                .map_err(|e| CloudError::ApiUnavailable {
                    detail: format!("invalid request URL: {e}"),
                    payload: Value::Null,
                })?
                .to_string()
        };

        // The signature covers the exact URL and body bytes sent.
        let body_text = body.map(|b| b.to_string()).unwrap_or_default();
        let timestamp = now_epoch() + self.drift().await?;
        let signature = self.sign(method.as_str(), &url, &body_text, timestamp);

        tracing::debug!(%method, %url, "issuing signed request");

        let mut request = self
            .http
            .request(method.clone(), url.as_str())
            .header("X-Ovh-Application", &self.application_key)
            .header("X-Ovh-Consumer", &self.consumer_key)
            .header("X-Ovh-Timestamp", timestamp.to_string())
            .header("X-Ovh-Signature", signature)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !body_text.is_empty() {
            request = request.body(body_text);
        }

        let response = request.send().await.map_err(transport_error)?;
        let payload = read_response(method, response).await?;
        serde_json::from_value(payload).map_err(|e| CloudError::ApiUnavailable {
            detail: format!("unexpected response shape: {e}"),
            payload: Value::Null,
        })
    }

    /// `"$1$" + SHA1(secret+consumer+method+url+body+timestamp)`, fields
    /// joined with `+`.
    fn sign(&self, method: &str, url: &str, body: &str, timestamp: i64) -> String {
        let input = format!(
            "{}+{}+{}+{}+{}+{}",
            self.application_secret, self.consumer_key, method, url, body, timestamp
        );
        format!("$1${}", hex::encode(Sha1::digest(input.as_bytes())))
    }
}

fn now_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn transport_error(error: reqwest::Error) -> CloudError {
    CloudError::ApiUnavailable {
        detail: error.to_string(),
        payload: Value::Null,
    }
}

/// Map a completed exchange to its JSON payload, or forward the
/// provider's error body verbatim.
async fn read_response(method: Method, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;
    let payload = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    };

    if status.is_success() {
        return Ok(payload);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(CloudError::Unauthorized { payload });
    }
    if method == Method::GET {
        return Err(CloudError::ApiUnavailable {
            detail: format!("HTTP {status}"),
            payload,
        });
    }
    Err(CloudError::TransitionRejected {
        status: status.as_u16(),
        payload,
    })
}

fn resolve_endpoint(endpoint: &str) -> Result<String> {
    if let Some((_, url)) = ENDPOINTS.iter().find(|(alias, _)| *alias == endpoint) {
        return Ok((*url).to_string());
    }
    if endpoint.starts_with("https://") {
        return Ok(endpoint.trim_end_matches('/').to_string());
    }
    let aliases: Vec<&str> = ENDPOINTS.iter().map(|(alias, _)| *alias).collect();
    Err(CloudError::InvalidConfiguration {
        name: "OVH_ENDPOINT".to_string(),
        detail: format!(
            "unknown endpoint \"{}\" (expected one of {} or an https:// base URL)",
            endpoint,
            aliases.join(", ")
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(secret: &str, consumer: &str) -> OvhClient {
        OvhClient::new(Credentials {
            endpoint: "ovh-eu".to_string(),
            application_key: "app-key".to_string(),
            application_secret: secret.to_string(),
            consumer_key: consumer.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn signature_matches_known_answers() {
        let c = client("application-secret", "consumer-key");
        assert_eq!(
            c.sign("GET", "https://eu.api.ovh.com/1.0/cloud/project", "", 1366560945),
            "$1$38b5bc260cce4dd55423379774fa500713448b51"
        );

        let c = client("secret", "ck");
        assert_eq!(
            c.sign(
                "POST",
                "https://eu.api.ovh.com/1.0/cloud/project/p/instance/i/start",
                "{}",
                1700000000
            ),
            "$1$1f0aaab5d54f92ee45dde797dcd361d39ca4d4cd"
        );
    }

    #[test]
    fn endpoint_aliases_resolve_to_base_urls() {
        assert_eq!(resolve_endpoint("ovh-eu").unwrap(), "https://eu.api.ovh.com/1.0");
        assert_eq!(resolve_endpoint("ovh-ca").unwrap(), "https://ca.api.ovh.com/1.0");
        assert_eq!(
            resolve_endpoint("https://api.example.test/1.0/").unwrap(),
            "https://api.example.test/1.0"
        );
    }

    #[test]
    fn unknown_endpoint_is_a_configuration_error() {
        let err = resolve_endpoint("ovh-moon").unwrap_err();
        match err {
            CloudError::InvalidConfiguration { name, detail } => {
                assert_eq!(name, "OVH_ENDPOINT");
                assert!(detail.contains("ovh-moon"));
                assert!(detail.contains("ovh-eu"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
