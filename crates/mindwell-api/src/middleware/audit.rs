use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::middleware::auth::AuthUser;

/// Logs every API request as one structured `api_request` event.
///
/// Runs outside the auth layer, so the user id is only present when the
/// request reached a protected handler.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let user_id = response
        .extensions()
        .get::<AuthUser>()
        .map(|u| u.user_id.clone());
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        user_id = user_id.as_deref(),
        "api_request"
    );

    response
}
