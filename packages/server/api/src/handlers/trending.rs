use crate::handlers::ServiceError;
use crate::services::trending::RepositoryOutcome;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use shared::dto::TrendingQuery;
use trending_domain::{ListingType, TimeWindow};

/// Shared caches may hold a listing for five minutes and serve it stale
/// for ten more while revalidating.
pub const CACHE_POLICY: &str = "public, s-maxage=300, stale-while-revalidate=600";

pub async fn trending_handler(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Result<Response, ServiceError> {
    let now = Utc::now();
    let language = params.language();

    if let Some(since) = params.since.as_deref() {
        if since.parse::<TimeWindow>().is_err() {
            tracing::warn!(since, "Unknown time window, using daily");
        }
    }
    let window = TimeWindow::from_param(params.since.as_deref());
    let listing = ListingType::from_param(params.kind.as_deref());

    tracing::info!(
        language = language.unwrap_or("any"),
        since = %window,
        listing = ?listing,
        "Trending request"
    );

    match listing {
        ListingType::Developers => {
            let developers = state.trending.developers(language, window, now).await;
            if developers.generated_at.is_some() {
                Ok(([(CACHE_CONTROL, CACHE_POLICY)], Json(developers)).into_response())
            } else {
                Ok(Json(developers).into_response())
            }
        }
        ListingType::Repositories => {
            match state.trending.repositories(language, window, now).await {
                Ok(RepositoryOutcome::Ranked(listing)) => {
                    Ok(([(CACHE_CONTROL, CACHE_POLICY)], Json(listing)).into_response())
                }
                Ok(RepositoryOutcome::Fallback(listing)) => Ok(Json(listing).into_response()),
                Err(e) => {
                    tracing::error!("Error fetching trending data: {}", e);
                    Err(ServiceError::Upstream {
                        status: e.status(),
                        message: e.upstream_message().map(str::to_string),
                    })
                }
            }
        }
    }
}
