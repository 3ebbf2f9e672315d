//! Catalog and discovery endpoints: home page, coverage areas, categories,
//! reviews, plans, and time slots.

use dwello_client::{ApiClient, paths};
use dwello_types::{
    ApiError, Area, AreasServedResponse, Category, HomePageData, Plan, Review, TimeSlot,
};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testimonial_limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreasServedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSearchQuery {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
}

/// Read-only catalog operations.
pub struct HomeService {
    client: ApiClient,
}

impl HomeService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the aggregated home-screen payload.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn home_page(&self, query: &HomePageQuery) -> Result<HomePageData, ApiError> {
        self.client
            .get_query::<HomePageData, _>(paths::HOME, query)
            .await?
            .into_data()
    }

    /// Lists cities with service coverage.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn areas_served(
        &self,
        query: &AreasServedQuery,
    ) -> Result<AreasServedResponse, ApiError> {
        self.client
            .get_query::<AreasServedResponse, _>(paths::AREAS_SERVED, query)
            .await?
            .into_data()
    }

    /// Lists service categories, optionally scoped to an area.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn categories(&self, query: &CategoriesQuery) -> Result<Vec<Category>, ApiError> {
        self.client
            .get_query::<Vec<Category>, _>(paths::CATEGORIES, query)
            .await?
            .into_data()
    }

    /// Lists customer reviews.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn reviews(&self, query: &ReviewsQuery) -> Result<Vec<Review>, ApiError> {
        self.client
            .get_query::<Vec<Review>, _>(paths::REVIEWS, query)
            .await?
            .into_data()
    }

    /// Searches coverage areas by name.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn search_areas(&self, query: &AreaSearchQuery) -> Result<Vec<Area>, ApiError> {
        self.client
            .get_query::<Vec<Area>, _>(paths::AREAS_SEARCH, query)
            .await?
            .into_data()
    }

    /// Lists areas where a category is available.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn areas_by_category(&self, category_id: &str) -> Result<Vec<Area>, ApiError> {
        let path = format!("{}/{category_id}", paths::AREAS_BY_CATEGORY);
        self.client.get::<Vec<Area>>(&path).await?.into_data()
    }

    /// Lists subscription plans.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn plans(&self, query: &PlansQuery) -> Result<Vec<Plan>, ApiError> {
        self.client
            .get_query::<Vec<Plan>, _>(paths::PLANS, query)
            .await?
            .into_data()
    }

    /// Lists bookable time slots.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn time_slots(&self) -> Result<Vec<TimeSlot>, ApiError> {
        self.client
            .get::<Vec<TimeSlot>>(paths::TIME_SLOTS)
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwello_store::MemoryCredentialStore;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> HomeService {
        HomeService::new(ApiClient::with_http(
            reqwest::Client::new(),
            &server.uri(),
            Arc::new(MemoryCredentialStore::new()),
        ))
    }

    #[tokio::test]
    async fn test_categories_query_is_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .and(query_param("areaId", "ar-1"))
            .and(query_param("rootOnly", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"id": "c-1", "name": "Cleaning", "slug": "cleaning", "order": 1}]
            })))
            .mount(&server)
            .await;

        let query = CategoriesQuery {
            area_id: Some("ar-1".into()),
            root_only: Some(true),
            ..CategoriesQuery::default()
        };
        let categories = service(&server).categories(&query).await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "cleaning");
    }

    #[tokio::test]
    async fn test_time_slots_parse() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/time-slots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "id": "ts-1", "displayText": "9 AM - 11 AM",
                    "startTime": "09:00", "endTime": "11:00",
                    "order": 1, "isActive": true
                }]
            })))
            .mount(&server)
            .await;

        let slots = service(&server).time_slots().await.unwrap();
        assert_eq!(slots[0].display_text, "9 AM - 11 AM");
    }

    #[tokio::test]
    async fn test_areas_by_category_builds_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/areas/by-category/c-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"id": "ar-1", "name": "Baner"}]
            })))
            .mount(&server)
            .await;

        let areas = service(&server).areas_by_category("c-9").await.unwrap();
        assert_eq!(areas[0].name, "Baner");
    }

    #[tokio::test]
    async fn test_envelope_failure_maps_to_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/home"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "City not served"
            })))
            .mount(&server)
            .await;

        let err = service(&server)
            .home_page(&HomePageQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, "City not served");
    }
}
