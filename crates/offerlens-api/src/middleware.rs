//! Router middleware
//!
//! CORS stays permissive: the API is consumed by browser UIs on other
//! origins and carries no cookies.
use tower_http::cors::CorsLayer;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
