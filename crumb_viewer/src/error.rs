//! Viewer errors and their HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Item not found")]
    ItemNotFound,

    #[error("Plot not found")]
    PlotNotFound,

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ViewerError::ItemNotFound | ViewerError::PlotNotFound => StatusCode::NOT_FOUND,
            ViewerError::Bind { .. } | ViewerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match status {
            StatusCode::NOT_FOUND => self.to_string(),
            _ => "Internal server error".to_string(),
        };
        (status, message).into_response()
    }
}
