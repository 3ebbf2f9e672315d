//! Profile and address operations.

use dwello_client::{ApiClient, paths};
use dwello_types::{Address, ApiError, User, UserUpdate};

/// Operations against `/users/me`.
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.client
            .get::<User>(paths::USERS_ME)
            .await?
            .into_data()
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let user = self
            .client
            .patch::<User, _>(paths::USERS_ME, update)
            .await?
            .into_data()?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Adds a service address to the profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn add_address(&self, address: &Address) -> Result<Address, ApiError> {
        let path = format!("{}/addresses", paths::USERS_ME);
        self.client
            .post::<Address, _>(&path, address)
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwello_store::MemoryCredentialStore;
    use dwello_types::{AuthSession, TokenPair};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> UserService {
        let store = Arc::new(MemoryCredentialStore::with_session(AuthSession::new(
            TokenPair::new("a1", "r1"),
        )));
        UserService::new(ApiClient::with_http(
            reqwest::Client::new(),
            &server.uri(),
            store,
        ))
    }

    #[tokio::test]
    async fn test_profile_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": "u-1", "firstName": "Asha"}
            })))
            .mount(&server)
            .await;

        let user = service(&server).profile().await.unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.first_name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn test_update_profile_patches_camel_case_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/me"))
            .and(wiremock::matchers::body_json(json!({"firstName": "Asha", "city": "Pune"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": "u-1", "firstName": "Asha", "city": "Pune"}
            })))
            .mount(&server)
            .await;

        let update = UserUpdate {
            first_name: Some("Asha".into()),
            city: Some("Pune".into()),
            ..UserUpdate::default()
        };
        let user = service(&server).update_profile(&update).await.unwrap();
        assert_eq!(user.city.as_deref(), Some("Pune"));
    }

    // Profile completion after an email-first signup: the patch carries the
    // phone number alongside name, city, and language.
    #[tokio::test]
    async fn test_update_profile_patches_phone_number() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/me"))
            .and(wiremock::matchers::body_json(json!({
                "phoneNumber": "9876543210",
                "firstName": "Asha",
                "city": "Pune",
                "language": "en"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "id": "u-1", "firstName": "Asha", "city": "Pune",
                    "language": "en", "phoneNumber": "9876543210"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let update = UserUpdate {
            phone_number: Some("9876543210".into()),
            first_name: Some("Asha".into()),
            city: Some("Pune".into()),
            language: Some("en".into()),
            ..UserUpdate::default()
        };
        let user = service(&server).update_profile(&update).await.unwrap();
        assert_eq!(user.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(user.language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_add_address() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/me/addresses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "id": "ad-1", "addressLine1": "12 Rose St", "city": "Pune",
                    "state": "MH", "country": "IN", "pincode": "411001"
                }
            })))
            .mount(&server)
            .await;

        let address: Address = serde_json::from_value(json!({
            "addressLine1": "12 Rose St", "city": "Pune", "state": "MH",
            "country": "IN", "pincode": "411001"
        }))
        .unwrap();
        let saved = service(&server).add_address(&address).await.unwrap();
        assert_eq!(saved.id.as_deref(), Some("ad-1"));
    }
}
