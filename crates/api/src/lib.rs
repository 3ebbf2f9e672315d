//! Typed service wrappers over the Dwello API gateway.
//!
//! Each service owns an [`ApiClient`](dwello_client::ApiClient) and converts
//! response envelopes into domain values or the normalized
//! [`ApiError`](dwello_types::ApiError).

pub mod auth;
pub mod home;
pub mod orders;
pub mod user;

pub use auth::AuthService;
pub use home::{
    AreaSearchQuery, AreasServedQuery, CategoriesQuery, HomePageQuery, HomeService, PlansQuery,
    ReviewsQuery,
};
pub use orders::OrderService;
pub use user::UserService;
