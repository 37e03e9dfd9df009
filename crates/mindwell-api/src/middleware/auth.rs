use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use mindwell_core::doc_keys;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity middleware.
///
/// Token verification happens upstream (API Gateway authorizer), which
/// forwards the verified subject in the configured user header. This layer
/// only requires the header and checks the id is safe to use as a key.
pub async fn require_user(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = req
        .headers()
        .get(state.config.user_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing user identity".to_string()))?
        .to_string();

    doc_keys::check_user_id(&user_id).map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let user = AuthUser { user_id };
    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Authenticated user, available to handlers as an `Extension`.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
}
