use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::app::{AppContext, SocialError};
use crate::domain::ExtractionResult;
use crate::scraper::ImageFormat;

#[derive(Debug, Default, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

impl UrlQuery {
    /// The `url` parameter, treating an empty value as absent.
    fn require(&self) -> Result<&str, ApiError> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ApiError(SocialError::MissingInput)),
        }
    }
}

/// Error body returned by every endpoint: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub SocialError);

impl From<SocialError> for ApiError {
    fn from(err: SocialError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            warn!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub(super) async fn index() -> &'static str {
    "socialprobe: GET /api/social-info?url=<url> or /api/screenshot?url=<url>\n"
}

pub async fn social_info_handler(
    State(ctx): State<AppContext>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let url = query.require()?;
    let result = ctx.social_info(url).await?;
    Ok(Json(result))
}

pub async fn screenshot_handler(
    State(ctx): State<AppContext>,
    Query(query): Query<UrlQuery>,
) -> Result<Response, ApiError> {
    let url = query.require()?;
    let png = ctx.screenshot(url).await?;
    Ok(([(header::CONTENT_TYPE, ImageFormat::Png.content_type())], png).into_response())
}
