use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("not found")]
    NotFound,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::Migrate(_)
            | AppError::Json(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => {
                return (
                    StatusCode::NOT_FOUND,
                    AskamaTemplateResponse::into_response(NotFoundTemplate),
                )
                    .into_response();
            }
        };

        if status.is_server_error() {
            error!("request failed: {self}");
        }

        (status, self.to_string()).into_response()
    }
}
