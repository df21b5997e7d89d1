use axum::{
    extract::{Query, State},
    http::{
        header::{COOKIE, REFERER, USER_AGENT},
        HeaderMap, HeaderName,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::sea_orm_active_enums::Term;
use crate::error::AppResult;
use crate::middlewares::AuthUser;
use crate::services::{CourseImportService, ForwardedHeaders, ImportResult, LanguageVariant};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, IntoParams)]
pub struct ImportCoursesParams {
    pub year: i32,
    pub term: Term,
    /// `ko`, `en` or `all` (Korean and English merged)
    #[param(default = "all")]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportCoursesResponse {
    pub inserted_count: u64,
    pub updated_count: u64,
}

impl From<ImportResult> for ImportCoursesResponse {
    fn from(r: ImportResult) -> Self {
        Self {
            inserted_count: r.inserted_count,
            updated_count: r.updated_count,
        }
    }
}

// ============ Handlers ============

/// Import the course catalog of one term from the registration site
#[utoipa::path(
    post,
    path = "/api/import/courses",
    params(ImportCoursesParams),
    responses(
        (status = 200, description = "Import finished", body = ImportCoursesResponse),
        (status = 400, description = "Invalid parameters or upstream returned an HTML page"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Export could not be decoded"),
        (status = 502, description = "Upstream unreachable or returned an error status")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Import"
)]
pub async fn import_courses(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ImportCoursesParams>,
    headers: HeaderMap,
) -> AppResult<Json<ImportCoursesResponse>> {
    let variant = match params.lang.as_deref() {
        Some(lang) => lang.parse::<LanguageVariant>()?,
        None => LanguageVariant::default(),
    };

    tracing::info!(user_id = %user.id, year = params.year, term = %params.term, "Course import requested");

    let result = CourseImportService::import(
        &state.db,
        state.fetcher.as_ref(),
        params.year,
        params.term,
        variant,
        forwarded_headers(&headers),
    )
    .await?;

    Ok(Json(result.into()))
}

fn forwarded_headers(headers: &HeaderMap) -> ForwardedHeaders {
    let get = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    ForwardedHeaders {
        cookie: get(COOKIE),
        user_agent: get(USER_AGENT),
        referer: get(REFERER),
    }
}
