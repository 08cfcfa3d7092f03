use axum::http::{Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build a CORS layer from a comma-separated origin list.
///
/// - `*` (or an empty list) allows any origin
/// - Methods: GET, POST, OPTIONS
/// - Headers: Content-Type
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origin_values: Vec<_> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect();

    let allow_origin = if origin_values.is_empty() || origin_values.contains(&"*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origin_values
                .into_iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
