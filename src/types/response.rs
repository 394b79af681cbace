use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// List envelope used by the catalogue endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// 201 response carrying the created resource and a message
pub struct Created<T: Serialize> {
    pub data: T,
    pub message: &'static str,
}

impl<T: Serialize> Created<T> {
    pub fn new(data: T, message: &'static str) -> Self {
        Self { data, message }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::CREATED,
            Json(ApiResponse::with_message(self.data, self.message)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_response_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Logged out")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "message": "Logged out" }));
    }

    #[test]
    fn test_list_response_counts() {
        let json = serde_json::to_value(ListResponse::new(vec!["a", "b"])).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"][1], "b");
    }

    #[test]
    fn test_created_status() {
        let response = Created::new(1, "Oil created successfully").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
