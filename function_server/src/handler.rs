use axum::http::StatusCode;
use common::{LinearModel, PredictRequest};
use serde_json::{json, Value};

/// The function entry point, independent of the hosting router: takes the
/// raw request body and returns a `(status, JSON body)` pair. Bodies that
/// are not a JSON object carrying a `features` key are rejected without
/// reaching the model.
pub fn handle(model: &LinearModel, body: &[u8]) -> (StatusCode, Value) {
    let Ok(payload) = serde_json::from_slice::<Value>(body) else {
        return invalid_input();
    };
    if payload.get("features").is_none() {
        return invalid_input();
    }

    let request: PredictRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(err) => return (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() })),
    };

    match model.predict(&request.features) {
        Ok(prediction) => (StatusCode::OK, json!({ "prediction": prediction })),
        Err(err) => (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() })),
    }
}

fn invalid_input() -> (StatusCode, Value) {
    (StatusCode::BAD_REQUEST, json!({ "error": "Invalid input" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> LinearModel {
        LinearModel {
            coefficients: vec![300.0],
            intercept: 0.0,
        }
    }

    #[test]
    fn test_empty_body_is_invalid_input() {
        let (status, body) = handle(&test_model(), b"");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid input" }));
    }

    #[test]
    fn test_missing_features_key_is_invalid_input() {
        let (status, body) = handle(&test_model(), br#"{"size": 1750}"#);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid input" }));
    }

    #[test]
    fn test_non_object_body_is_invalid_input() {
        for body in [&b"null"[..], b"[1750.0]", b"\"features\""] {
            let (status, payload) = handle(&test_model(), body);

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(payload, json!({ "error": "Invalid input" }));
        }
    }

    #[test]
    fn test_valid_body_predicts() {
        let (status, body) = handle(&test_model(), br#"{"features": [1750.0]}"#);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "prediction": 525_000.0 }));
    }

    #[test]
    fn test_wrong_feature_type_reports_error() {
        let (status, body) = handle(&test_model(), br#"{"features": "abc"}"#);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error = body["error"].as_str().unwrap();
        assert_ne!(error, "Invalid input");
        assert!(error.contains("invalid type"));
    }

    #[test]
    fn test_wrong_arity_reports_dimension_mismatch() {
        let (status, body) = handle(&test_model(), br#"{"features": [1.0, 2.0]}"#);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("dimension mismatch"));
    }
}
