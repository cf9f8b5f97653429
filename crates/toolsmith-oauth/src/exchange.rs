//! Standard OAuth2 client-credentials token exchange.
//!
//! One form-encoded POST against the profile's token endpoint with HTTP
//! Basic client authentication. No retry, backoff, or caching; a failed
//! exchange surfaces immediately as a single error.

use serde::Deserialize;

use crate::client::OAuthClient;
use crate::error::{OAuthError, Result};

/// Token endpoint response for a client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// Perform the client-credentials grant and return the access token.
pub async fn exchange(client: &OAuthClient) -> Result<String> {
    let mut form: Vec<(&str, &str)> = vec![("grant_type", "client_credentials")];
    if !client.scopes.is_empty() {
        form.push(("scope", &client.scopes));
    }
    if !client.audience.is_empty() {
        form.push(("audience", &client.audience));
    }

    let http = reqwest::Client::new();
    let response = http
        .post(&client.token_url)
        .basic_auth(&client.client_id, Some(&client.client_secret))
        .form(&form)
        .send()
        .await
        .map_err(|e| OAuthError::Network(format!("token request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(OAuthError::Exchange(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| OAuthError::Exchange(format!("malformed token response: {}", e)))?;

    Ok(token.access_token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, scopes: &str, audience: &str) -> OAuthClient {
        OAuthClient {
            client_id: "id1".to_string(),
            client_secret: "sec1".to_string(),
            token_url: format!("{}/token", server.uri()),
            scopes: scopes.to_string(),
            audience: audience.to_string(),
        }
    }

    #[tokio::test]
    async fn test_exchange_returns_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header_exists("authorization"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"access_token":"tok-abc","token_type":"bearer","expires_in":3600}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let token = exchange(&client_for(&server, "read", "aud1")).await.unwrap();
        assert_eq!(token, "tok-abc");
    }

    #[tokio::test]
    async fn test_exchange_sends_scope_and_audience_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("scope=read+write"))
            .and(body_string_contains("audience=aud1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"access_token":"tok-abc","token_type":"bearer","expires_in":3600}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        exchange(&client_for(&server, "read write", "aud1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_exchange_omits_empty_scope_and_audience() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"access_token":"tok-abc","token_type":"bearer","expires_in":3600}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        exchange(&client_for(&server, "", "")).await.unwrap();

        let requests = server.received_requests().await.unwrap_or_default();
        let body = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(!body.contains("scope="));
        assert!(!body.contains("audience="));
    }

    #[tokio::test]
    async fn test_exchange_rejection_is_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_raw(r#"{"error":"invalid_client"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let err = exchange(&client_for(&server, "", "")).await.unwrap_err();
        match err {
            OAuthError::Exchange(msg) => {
                assert!(msg.contains("401"), "missing status in: {msg}");
                assert!(msg.contains("invalid_client"), "missing body in: {msg}");
            }
            other => panic!("expected Exchange error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_token_response_is_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
            .mount(&server)
            .await;

        let err = exchange(&client_for(&server, "", "")).await.unwrap_err();
        assert!(matches!(err, OAuthError::Exchange(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = OAuthClient {
            client_id: "id1".to_string(),
            client_secret: "sec1".to_string(),
            // Discard port, connection refused immediately.
            token_url: "http://127.0.0.1:9/token".to_string(),
            scopes: String::new(),
            audience: String::new(),
        };
        let err = exchange(&client).await.unwrap_err();
        assert!(matches!(err, OAuthError::Network(_)));
    }
}
