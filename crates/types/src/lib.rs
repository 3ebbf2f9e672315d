//! Core types and traits for the dwello workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! Dwello client SDK: the response envelope, the normalized API error, the
//! stored session types, backend wire models, and the credential-store trait.

pub mod dto;
pub mod envelope;
pub mod error;
pub mod models;
pub mod session;
pub mod traits;

pub use dto::{
    CreateOrder, CreateOrderMeta, LogoutRequest, OrderTimeSlot, RefreshTokenRequest, RequestOtp,
    RequestOtpResponse, SessionResponse, UserUpdate, VerifyOtp,
};
pub use envelope::ApiResponse;
pub use error::{ApiError, DEFAULT_ERROR_MESSAGE, StoreError};
pub use models::{
    Address, Area, AreaServed, AreasServed, AreasServedResponse, Category, HeroBanner,
    HomePageData, Order, OrderMeta, Plan, RazorpayOrder, Review, ReviewAuthor, Role, RoleRef,
    SecondaryBanner, TimeSlot, User,
};
pub use session::{AuthSession, TokenPair};
pub use traits::{CredentialStore, StoreResult};
