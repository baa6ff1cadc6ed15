use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::{CheckersError, Position};

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    GameNotFound(String),
    IllegalMove { from: Position, to: Position },
    GameOver(String),
    InvalidRequest(String),
    CorruptState(CheckersError),
    TooManyGames(usize),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::GameNotFound(id) => (
                StatusCode::NOT_FOUND,
                "GAME_NOT_FOUND",
                format!("Game not found: {id}"),
            ),
            ApiError::IllegalMove { from, to } => (
                StatusCode::BAD_REQUEST,
                "ILLEGAL_MOVE",
                format!("Illegal move: {from} -> {to}"),
            ),
            ApiError::GameOver(result) => (
                StatusCode::BAD_REQUEST,
                "GAME_OVER",
                format!("Game is already over: {result}"),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::CorruptState(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CORRUPT_STATE",
                err.to_string(),
            ),
            ApiError::TooManyGames(limit) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "TOO_MANY_GAMES",
                format!("Game limit reached ({limit})"),
            ),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CheckersError> for ApiError {
    fn from(err: CheckersError) -> Self {
        ApiError::CorruptState(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_to_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn game_not_found_returns_404() {
        let (status, json) = error_to_json(ApiError::GameNotFound("abc".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "GAME_NOT_FOUND");
    }

    #[tokio::test]
    async fn illegal_move_returns_400() {
        let err = ApiError::IllegalMove {
            from: Position::new(2, 1),
            to: Position::new(4, 3),
        };
        let (status, json) = error_to_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "ILLEGAL_MOVE");
        assert_eq!(json["error"]["message"], "Illegal move: (2, 1) -> (4, 3)");
    }

    #[tokio::test]
    async fn too_many_games_returns_503() {
        let (status, json) = error_to_json(ApiError::TooManyGames(10)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"]["code"], "TOO_MANY_GAMES");
    }

    #[tokio::test]
    async fn checkers_error_converts_to_corrupt_state() {
        let api_err: ApiError = CheckersError::BoardLength {
            expected: 64,
            actual: 3,
        }
        .into();
        let (status, json) = error_to_json(api_err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "CORRUPT_STATE");
    }
}
