//! Backend route constants and the refresh-exemption rule.

pub const AUTH_REQUEST_OTP: &str = "/auth/otp/request";
pub const AUTH_VERIFY_OTP: &str = "/auth/otp/verify";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_LOGOUT: &str = "/auth/logout";

pub const USERS_ME: &str = "/users/me";

pub const HOME: &str = "/home";
pub const AREAS_SERVED: &str = "/areas-served";
pub const CATEGORIES: &str = "/categories";
pub const REVIEWS: &str = "/reviews";
pub const AREAS_SEARCH: &str = "/areas/search";
pub const AREAS_BY_CATEGORY: &str = "/areas/by-category";
pub const PLANS: &str = "/plans";
pub const TIME_SLOTS: &str = "/time-slots";

pub const ORDERS: &str = "/orders";
pub const ORDERS_ME: &str = "/orders/me";

/// Returns `true` for paths whose 401 responses must never trigger a token
/// refresh: the OTP endpoints (no session exists yet) and the refresh
/// endpoint itself (a refresh loop would never terminate).
#[must_use]
pub fn skips_refresh(path: &str) -> bool {
    path.contains("/auth/otp") || path.contains("/auth/refresh")
}
