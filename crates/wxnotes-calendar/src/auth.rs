//! Service-account authentication.
//!
//! The credential file is read on every call and never cached. A signed RS256
//! assertion is exchanged at the key's `token_uri` for a short-lived bearer
//! token (OAuth 2.0 JWT bearer grant).

use std::path::Path;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::CalendarError;

pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

/// Fields of a service-account key file that the sync needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl ServiceAccountKey {
    /// Read and parse a key file.
    ///
    /// # Errors
    /// Returns `CalendarError::Credentials` if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, CalendarError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalendarError::Credentials(format!("{}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| CalendarError::Credentials(format!("{}: {}", path.display(), e)))
    }

    /// Signed assertion valid for one hour from `now`.
    ///
    /// # Errors
    /// Returns `CalendarError::Credentials` if the private key is not a usable RSA PEM.
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String, CalendarError> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: CALENDAR_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| CalendarError::Credentials(format!("invalid private key: {}", e)))?;

        encode(&header, &claims, &key)
            .map_err(|e| CalendarError::Credentials(format!("failed to sign assertion: {}", e)))
    }

    /// Exchange a fresh assertion for an access token.
    ///
    /// # Errors
    /// `CalendarError::TokenExchange` when the token endpoint refuses the
    /// assertion, `CalendarError::NetworkError` on transport failure.
    #[instrument(skip(self, client), fields(client_email = %self.client_email), level = "info")]
    pub async fn fetch_access_token(
        &self,
        client: &reqwest::Client,
    ) -> Result<String, CalendarError> {
        let assertion = self.assertion(Utc::now())?;

        let response = client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CalendarError::TokenExchange(format!("{}: {}", status, text)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::TokenExchange(format!("JSON parse error: {}", e)))?;
        tracing::debug!(expires_in = ?token.expires_in, "Obtained calendar access token");

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_PRIVATE_KEY: &str = include_str!("../tests/fixtures/test_service_account_key.pem");
    const TEST_PUBLIC_KEY: &str = include_str!("../tests/fixtures/test_service_account_pub.pem");

    fn test_key(token_uri: &str) -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "notes@test-project.iam.gserviceaccount.com".to_string(),
            private_key: TEST_PRIVATE_KEY.to_string(),
            private_key_id: Some("kid-1".to_string()),
            token_uri: token_uri.to_string(),
        }
    }

    #[test]
    fn test_load_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "type": "service_account",
                "project_id": "test-project",
                "client_email": "notes@test-project.iam.gserviceaccount.com",
                "private_key": TEST_PRIVATE_KEY,
                "private_key_id": "kid-1"
            })
            .to_string(),
        )
        .unwrap();

        let key = ServiceAccountKey::load(&path).unwrap();

        assert_eq!(key.client_email, "notes@test-project.iam.gserviceaccount.com");
        assert_eq!(key.token_uri, GOOGLE_TOKEN_URL);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ServiceAccountKey::load(&dir.path().join("credentials.json"));
        assert!(matches!(result, Err(CalendarError::Credentials(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, r#"{"client_email": 5}"#).unwrap();
        assert!(matches!(
            ServiceAccountKey::load(&path),
            Err(CalendarError::Credentials(_))
        ));
    }

    #[test]
    fn test_debug_hides_private_key() {
        let key = test_key(GOOGLE_TOKEN_URL);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("PRIVATE KEY"));
        assert!(debug.contains("notes@test-project"));
    }

    #[test]
    fn test_assertion_claims() {
        let key = test_key("https://oauth2.example.test/token");
        let now = Utc::now();

        let assertion = key.assertion(now).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.example.test/token"]);
        let decoded = decode::<AssertionClaims>(
            &assertion,
            &DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.header.kid.as_deref(), Some("kid-1"));
        assert_eq!(decoded.claims.iss, key.client_email);
        assert_eq!(decoded.claims.scope, CALENDAR_SCOPE);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
    }

    #[test]
    fn test_assertion_rejects_bad_key() {
        let mut key = test_key(GOOGLE_TOKEN_URL);
        key.private_key = "not a key".to_string();
        assert!(matches!(
            key.assertion(Utc::now()),
            Err(CalendarError::Credentials(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_access_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
            ))
            .and(body_string_contains("assertion="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.test",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let key = test_key(&format!("{}/token", mock_server.uri()));
        let token = key.fetch_access_token(&reqwest::Client::new()).await.unwrap();

        assert_eq!(token, "ya29.test");
    }

    #[tokio::test]
    async fn test_fetch_access_token_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant"
            })))
            .mount(&mock_server)
            .await;

        let key = test_key(&format!("{}/token", mock_server.uri()));
        let result = key.fetch_access_token(&reqwest::Client::new()).await;

        match result {
            Err(CalendarError::TokenExchange(msg)) => assert!(msg.contains("invalid_grant")),
            other => panic!("expected TokenExchange, got {:?}", other),
        }
    }
}
