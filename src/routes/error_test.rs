use super::*;

#[test]
fn backend_unauthorized_maps_to_401() {
    let err: ApiError = BackendError::Status { status: 401, message: "JWT expired".into() }.into();
    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn backend_client_error_keeps_message() {
    let err: ApiError = BackendError::Status { status: 400, message: "Invalid login credentials".into() }.into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[test]
fn backend_outage_maps_to_502_without_internal_detail() {
    let err: ApiError = BackendError::Request("dns error: backend.internal".into()).into();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    assert!(!err.to_string().contains("backend.internal"));
}

#[test]
fn into_response_uses_error_status() {
    let response = ApiError::BadRequest("nome vazio".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
