//! HTTP boundary: request/response shapes, status mapping and the router.
//!
//! The server binary only binds and serves [`router`], so everything here
//! can be driven without a socket.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::config::SearchParams;
use crate::distance::DistanceType;
use crate::error::Error;
use crate::result::NeighborhoodResult;
use crate::search::Algorithm;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CalculateRequest {
    pub grid: Option<Vec<Vec<f64>>>,
    pub distance: Option<i64>,
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Missing and `null` both mean no wrapping.
    #[serde(default)]
    pub wrap_rows: Option<bool>,
    #[serde(default)]
    pub wrap_cols: Option<bool>,
    #[serde(default)]
    pub distance_type: DistanceType,
}

/// Result plus an echo of the request parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub result: NeighborhoodResult,
    pub grid_size: String,
    pub distance_threshold: i64,
    pub algorithm_used: Algorithm,
    pub wrap_rows: bool,
    pub wrap_cols: bool,
    pub distance_type: DistanceType,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".into(),
            message: "Grid neighbors API is running".into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Validate a request and compute its neighborhood.
pub fn calculate(req: CalculateRequest) -> Result<CalculateResponse, ApiError> {
    let grid = req
        .grid
        .ok_or_else(|| ApiError::BadRequest("Grid data is required".into()))?;
    let distance = req
        .distance
        .ok_or_else(|| ApiError::BadRequest("Distance parameter is required".into()))?;
    if distance < 0 {
        return Err(ApiError::BadRequest(
            "Distance must be a non-negative integer".into(),
        ));
    }

    let params = SearchParams {
        distance,
        algorithm: req.algorithm,
        wrap_rows: req.wrap_rows.unwrap_or(false),
        wrap_cols: req.wrap_cols.unwrap_or(false),
        distance_type: req.distance_type,
    };
    let result = crate::neighborhood(&grid, &params)?.result;

    Ok(CalculateResponse {
        result,
        grid_size: format!("{}x{}", grid.len(), grid[0].len()),
        distance_threshold: distance,
        algorithm_used: params.algorithm,
        wrap_rows: params.wrap_rows,
        wrap_cols: params.wrap_cols,
        distance_type: params.distance_type,
    })
}

async fn calculate_handler(
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected request body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let response = tokio::task::spawn_blocking(move || calculate(req))
        .await
        .map_err(|join_err| {
            error!(error = %join_err, "calculation task failed");
            ApiError::Internal(join_err.to_string())
        })?;

    if let Err(err) = &response {
        warn!(error = %err, "invalid calculation request");
    }
    response.map(Json)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `POST /calculate` and `GET /health`, open to any origin.
pub fn router() -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> CalculateRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn computes_and_echoes_parameters() {
        let req = request(json!({
            "grid": [[0, 0, 0, 0, 0], [0, 1, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 1, 0, 0], [0, 0, 0, 0, 0]],
            "distance": 3,
            "algorithm": "bfs",
            "wrap_cols": true,
        }));
        let resp = calculate(req).unwrap();
        assert_eq!(resp.result.count, 25);
        assert_eq!(resp.result.positive_cells.len(), 2);
        assert_eq!(resp.grid_size, "5x5");
        assert_eq!(resp.algorithm_used, Algorithm::Bfs);
        assert!(resp.wrap_cols);
        assert!(!resp.wrap_rows);

        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["count"], 25);
        assert_eq!(body["distance_threshold"], 3);
        assert_eq!(body["algorithm_used"], "bfs");
        assert_eq!(body["distance_type"], "manhattan");
    }

    #[test]
    fn defaults_to_brute_force() {
        let resp = calculate(request(json!({"grid": [[0, 1, 0, 0, 0]], "distance": 2}))).unwrap();
        assert_eq!(resp.algorithm_used, Algorithm::BruteForce);
        assert_eq!(resp.result.count, 4);
    }

    #[test]
    fn missing_fields_are_bad_requests() {
        let err = calculate(request(json!({"distance": 1}))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Grid data is required");

        let err = calculate(request(json!({"grid": [[1]]}))).unwrap_err();
        assert_eq!(err.to_string(), "Distance parameter is required");
    }

    #[test]
    fn invalid_values_are_bad_requests() {
        let err = calculate(request(json!({"grid": [[1]], "distance": -1}))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = calculate(request(json!({"grid": [[1, 0], [0]], "distance": 1}))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid grid shape"));

        let err = calculate(request(json!({"grid": [], "distance": 1}))).unwrap_err();
        assert_eq!(err.to_string(), "Grid not specified or empty");
    }

    #[test]
    fn unknown_algorithm_fails_to_parse() {
        let parsed = serde_json::from_value::<CalculateRequest>(json!({
            "grid": [[1]],
            "distance": 1,
            "algorithm": "dijkstra",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = ApiError::Internal("worker panicked".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn null_wrap_flags_mean_no_wrapping() {
        let resp = calculate(request(json!({
            "grid": [[0, 1, 0, 0, 0]],
            "distance": 1,
            "wrap_rows": null,
            "wrap_cols": null,
        })))
        .unwrap();
        assert!(!resp.wrap_rows);
        assert!(!resp.wrap_cols);
        assert_eq!(resp.result.count, 3);
    }

    mod routes {
        use axum::body::{Body, to_bytes};
        use axum::http::{Request, StatusCode};
        use serde_json::{Value, json};
        use tower::ServiceExt;

        use crate::api::router;

        async fn send(req: Request<Body>) -> (StatusCode, Value) {
            let resp = router().oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        fn post_calculate(body: impl Into<Body>) -> Request<Body> {
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap()
        }

        #[tokio::test]
        async fn health_reports_running() {
            let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
            let (status, body) = send(req).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({"status": "healthy", "message": "Grid neighbors API is running"})
            );
        }

        #[tokio::test]
        async fn calculate_echoes_parameters() {
            let body = json!({
                "grid": [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
                "distance": 1,
                "algorithm": "bfs",
                "wrap_cols": true,
                "distance_type": "chebyshev",
            });
            let (status, body) = send(post_calculate(body.to_string())).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["count"], 9);
            assert_eq!(body["grid_size"], "3x3");
            assert_eq!(body["distance_threshold"], 1);
            assert_eq!(body["algorithm_used"], "bfs");
            assert_eq!(body["wrap_rows"], false);
            assert_eq!(body["wrap_cols"], true);
            assert_eq!(body["distance_type"], "chebyshev");
            assert_eq!(body["positive_cells"], json!([{"row": 1, "col": 1}]));
        }

        #[tokio::test]
        async fn malformed_json_is_a_bad_request() {
            let (status, body) = send(post_calculate("{\"grid\": [[0, 1")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }

        #[tokio::test]
        async fn unknown_algorithm_is_a_bad_request() {
            let body = json!({"grid": [[1]], "distance": 1, "algorithm": "dijkstra"});
            let (status, body) = send(post_calculate(body.to_string())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }

        #[tokio::test]
        async fn fractional_distance_is_a_bad_request() {
            let body = json!({"grid": [[0, 1, 0]], "distance": 1.0});
            let (status, body) = send(post_calculate(body.to_string())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }

        #[tokio::test]
        async fn invalid_grid_message_reaches_the_client() {
            let body = json!({"grid": [[1, 0], [0]], "distance": 1});
            let (status, body) = send(post_calculate(body.to_string())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Invalid grid shape. Row lengths: [2, 1]");
        }
    }
}
