//! Partner constants
//!
//! Endpoints and header names defined by the Alto (Zoopla) API. The URLs are
//! defaults only; every one of them can be overridden through configuration.

// OAuth2 client-credentials token endpoint (shared by both environments)
pub const ALTO_TOKEN_URL: &str = "https://oauth.zoopla.co.uk/oauth/token";

// API base URLs
pub const ALTO_SANDBOX_API_BASE: &str = "https://mobile-api.zoopla.co.uk/sandbox/v1";
pub const ALTO_PRODUCTION_API_BASE: &str = "https://mobile-api.zoopla.co.uk/v1";

/// Header carrying the partner-issued agency identifier on production calls.
pub const AGENCY_REF_HEADER: &str = "X-AgencyRef";

/// Default OAuth scope requested during the token exchange.
pub const DEFAULT_ALTO_SCOPE: &str = "api";

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Tokens are treated as expired this many seconds before their deadline.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Admin route operators use to paste the AgencyRef received by email.
pub const ADMIN_AGENCIES_PATH: &str = "/admin/alto-agencies";

// Listing defaults
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_ADMIN_PAGE_SIZE: u32 = 50;
