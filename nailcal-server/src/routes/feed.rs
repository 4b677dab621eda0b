//! iCalendar feed endpoint for phone calendar subscriptions.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Months;
use serde::Deserialize;

use nailcal_core::display::build_displays;
use nailcal_core::ics::{generate_feed, FeedOptions};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/calendar/feed", get(feed).head(feed_head))
}

#[derive(Deserialize)]
struct FeedQuery {
    token: Option<String>,
}

fn feed_headers() -> [(header::HeaderName, &'static str); 3] {
    [
        (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"calendar.ics\"",
        ),
        // The underlying data can change between any two requests
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    ]
}

fn token_matches(state: &AppState, token: Option<&str>) -> bool {
    token == Some(state.settings.feed_token.as_str())
}

/// GET /calendar/feed?token=... - the full feed document
async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Response, AppError> {
    if !token_matches(&state, query.token.as_deref()) {
        return Ok(StatusCode::UNAUTHORIZED.into_response());
    }

    let now = state.clock.now_utc();
    let from = now - Months::new(state.settings.feed_months_back);
    let to = now + Months::new(state.settings.feed_months_ahead);

    let (bookings, clients, procedures) = tokio::join!(
        state.store.list_bookings(Some((from, to))),
        state.store.list_clients(),
        state.store.list_procedures(false),
    );
    let displays = build_displays(&bookings?, &clients?, &procedures?);

    let options = FeedOptions {
        host: state.settings.feed_host.clone(),
        calendar_name: state.settings.calendar_name.clone(),
    };
    let body = generate_feed(&displays, now, &options);

    Ok((feed_headers(), body).into_response())
}

/// HEAD /calendar/feed?token=... - cheap reachability check for calendar
/// clients; no store round trip
async fn feed_head(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Response {
    if !token_matches(&state, query.token.as_deref()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    feed_headers().into_response()
}
