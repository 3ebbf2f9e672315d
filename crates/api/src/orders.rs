//! Order placement and tracking.

use dwello_client::{ApiClient, paths};
use dwello_types::{ApiError, CreateOrder, Order};
use serde_json::json;

/// Operations against the `/orders` endpoints.
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Places an order; the response carries the payment-gateway order needed
    /// to start checkout.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn create(&self, order: &CreateOrder) -> Result<Order, ApiError> {
        let created = self
            .client
            .post::<Order, _>(paths::ORDERS, order)
            .await?
            .into_data()?;
        tracing::info!(order_id = %created.id, "order created");
        Ok(created)
    }

    /// Fetches a single order. With `verify` set, the backend re-checks the
    /// payment status against the gateway before answering.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn get(&self, order_id: &str, verify: bool) -> Result<Order, ApiError> {
        let path = format!("{}/{order_id}", paths::ORDERS);
        let resp = if verify {
            self.client
                .get_query::<Order, _>(&path, &json!({"verify": "true"}))
                .await?
        } else {
            self.client.get::<Order>(&path).await?
        };
        resp.into_data()
    }

    /// Lists the authenticated user's orders.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on request failure or an unsuccessful envelope.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.client
            .get::<Vec<Order>>(paths::ORDERS_ME)
            .await?
            .into_data()
    }
}
