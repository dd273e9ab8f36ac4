//! Request extractors shared by route handlers.

use axum::{
    Form, Json,
    extract::{
        FromRequest, Request,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Extractor that accepts either a JSON or a URL-encoded form body.
///
/// Requests with an `application/json` content type are parsed as JSON;
/// everything else is handed to axum's `Form` extractor. This lets the HTML
/// form on the front-end page and API clients post to the same route.
pub struct JsonOrForm<T>(pub T);

/// Why a [`JsonOrForm`] body could not be read.
#[derive(Debug)]
pub enum JsonOrFormRejection {
    Json(JsonRejection),
    Form(FormRejection),
}

impl JsonOrFormRejection {
    /// Status axum would answer with for this rejection.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Json(rejection) => rejection.status(),
            Self::Form(rejection) => rejection.status(),
        }
    }

    /// Human-readable reason.
    #[must_use]
    pub fn body_text(&self) -> String {
        match self {
            Self::Json(rejection) => rejection.body_text(),
            Self::Form(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for JsonOrFormRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => rejection.into_response(),
            Self::Form(rejection) => rejection.into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonOrFormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(JsonOrFormRejection::Json)?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(JsonOrFormRejection::Form)?;
            Ok(Self(value))
        }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
