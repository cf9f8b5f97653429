//! The OAuth client profile record.

use serde::{Deserialize, Serialize};

/// One named OAuth2 client-credentials configuration.
///
/// `scopes` is a single opaque space-separated string, never parsed into a
/// set. `audience` is carried through but unused by the basic
/// client-credentials exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthClient {
    /// Opaque identifier assigned by the authorization server.
    pub client_id: String,
    /// Shared secret or private key material. Sensitive; lives only in the
    /// credential store and transiently in memory during a request.
    pub client_secret: String,
    /// Absolute URL of the token endpoint.
    pub token_url: String,
    /// Space-separated scope list, possibly empty.
    #[serde(default)]
    pub scopes: String,
    /// Audience, possibly empty.
    #[serde(default)]
    pub audience: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let client = OAuthClient {
            client_id: "id1".to_string(),
            client_secret: "sec1".to_string(),
            token_url: "https://x/token".to_string(),
            scopes: "read".to_string(),
            audience: "aud1".to_string(),
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["client_id"], "id1");
        assert_eq!(json["client_secret"], "sec1");
        assert_eq!(json["token_url"], "https://x/token");
        assert_eq!(json["scopes"], "read");
        assert_eq!(json["audience"], "aud1");
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let client: OAuthClient = serde_json::from_str(
            r#"{"client_id":"id","client_secret":"sec","token_url":"https://x/token"}"#,
        )
        .unwrap();
        assert!(client.scopes.is_empty());
        assert!(client.audience.is_empty());
    }
}
