//! Content negotiation for versioned book projections.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{header::ACCEPT, request::Parts},
};
use serde::Deserialize;

use bookshelf_core::views::{version_from_accept, ApiVersion};

use crate::state::AppState;

/// API version requested through `Accept: application/json; version=X.Y`,
/// or through a `?version=X.Y` query parameter when the header names none.
///
/// Falls back to the configured default when neither carries a parsable
/// version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedVersion(pub ApiVersion);

impl FromRequestParts<AppState> for RequestedVersion {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let version = parts
            .headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(version_from_accept)
            .or_else(|| version_from_query(parts))
            .unwrap_or(state.config.api_default_version);

        Ok(RequestedVersion(version))
    }
}

#[derive(Debug, Deserialize)]
struct VersionQuery {
    version: Option<String>,
}

fn version_from_query(parts: &Parts) -> Option<ApiVersion> {
    let Query(query) = Query::<VersionQuery>::try_from_uri(&parts.uri).ok()?;
    query.version?.trim().parse().ok()
}
