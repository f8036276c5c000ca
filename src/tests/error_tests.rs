#[cfg(test)]
mod tests {
    use crate::error::{validation, AppError, AppResult, OptionExt};
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::io;

    #[test]
    fn test_app_error_display() {
        let error = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(format!("{}", error), "Bad request: Invalid input");

        let error = AppError::NotFound("Resource not found".to_string());
        assert_eq!(format!("{}", error), "Not found: Resource not found");

        let error = AppError::RangeNotSatisfiable { size: 1000 };
        assert_eq!(format!("{}", error), "Range not satisfiable for 1000 bytes");
    }

    #[test]
    fn test_app_error_into_response() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Scanner("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::IoError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::RangeNotSatisfiable { size: 10 }, StatusCode::RANGE_NOT_SATISFIABLE),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::NotFound("Media file not found".into()).into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Media file not found");
        assert_eq!(json["status"], 404);
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret path /root")).into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("secret"));
        let json: Value = serde_json::from_str(&text).unwrap();
        assert!(json["error"]["details"]["error_id"].is_string());
    }

    #[test]
    fn test_range_error_carries_content_range() {
        let response = AppError::RangeNotSatisfiable { size: 1000 }.into_response();
        assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes */1000");
    }

    #[test]
    fn test_from_io_error() {
        let app_error: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(app_error, AppError::NotFound(ref m) if m == "File not found"));

        let app_error: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        match app_error {
            AppError::IoError(msg) => assert!(msg.contains("denied")),
            _ => panic!("Expected IoError variant"),
        }
    }

    #[tokio::test]
    async fn test_from_join_error() {
        let join_err = tokio::task::spawn_blocking(|| panic!("walker died")).await.unwrap_err();
        let app_error: AppError = join_err.into();
        assert!(matches!(app_error, AppError::Internal(_)));
    }

    #[test]
    fn test_option_ext() {
        let result: AppResult<i32> = Some(42).ok_or_not_found("Media file");
        assert_eq!(result.unwrap(), 42);

        let result: AppResult<i32> = None::<i32>.ok_or_not_found("Media file");
        match result.unwrap_err() {
            AppError::NotFound(msg) => assert_eq!(msg, "Media file not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_validate_path() {
        assert!(validation::validate_path("/valid/path").is_ok());
        assert!(validation::validate_path("C:\\Users\\me\\Videos").is_ok());

        match validation::validate_path("   ").unwrap_err() {
            AppError::ValidationError { field, message } => {
                assert_eq!(field, "paths");
                assert_eq!(message, "Path cannot be empty");
            }
            _ => panic!("Expected ValidationError"),
        }

        match validation::validate_path("path\0with\0null").unwrap_err() {
            AppError::ValidationError { message, .. } => {
                assert_eq!(message, "Path contains null characters");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_scan_paths() {
        let paths = validation::scan_paths(&json!({ "paths": ["/a", "D:\\Filme"] })).unwrap();
        assert_eq!(paths, vec!["/a".to_string(), "D:\\Filme".to_string()]);

        for body in [json!({}), json!({ "paths": [] }), json!({ "paths": "/a" }), json!([])] {
            assert!(matches!(validation::scan_paths(&body), Err(AppError::InvalidInput(_))), "{}", body);
        }
        assert!(matches!(
            validation::scan_paths(&json!({ "paths": ["/a", 1] })),
            Err(AppError::ValidationError { .. })
        ));
        assert!(matches!(
            validation::scan_paths(&json!({ "paths": [""] })),
            Err(AppError::ValidationError { .. })
        ));
    }
}
