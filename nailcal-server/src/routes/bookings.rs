//! Booking CRUD endpoints.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use nailcal_core::conflict::conflict_warning;
use nailcal_core::display::{build_displays, resolve_duration_secs, BookingDisplay};
use nailcal_core::{Booking, NewBooking, Procedure, SalonError, SalonResult};

use crate::routes::{ApiResponse, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}

#[derive(Deserialize)]
struct WindowQuery {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

/// GET /bookings - display records for a date window (or everything)
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDisplay>>>, AppError> {
    let window = match (query.from, query.to) {
        (Some(from), Some(to)) => Some((from, to)),
        _ => None,
    };

    let (bookings, clients, procedures) = tokio::join!(
        state.store.list_bookings(window),
        state.store.list_clients(),
        state.store.list_procedures(false),
    );

    let displays = build_displays(&bookings?, &clients?, &procedures?);
    Ok(Json(ApiResponse::success(displays)))
}

/// GET /bookings/:id - the raw record, as the edit form needs the ids
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state.store.get_booking(&id).await?;
    Ok(Json(ApiResponse::success(booking)))
}

/// POST /bookings - create; responds with an advisory conflict warning
/// when the new booking overlaps an existing one
async fn create_booking(
    State(state): State<AppState>,
    Json(new): Json<NewBooking>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    validate(&new)?;

    let warning = overlap_warning(&state, &new, None).await?;
    let created = state.store.create_booking(&new).await?;

    Ok(Json(ApiResponse::with_warning(created, warning)))
}

/// PUT /bookings/:id - full update of an existing booking
async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(new): Json<NewBooking>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    validate(&new)?;

    let warning = overlap_warning(&state, &new, Some(id.as_str())).await?;
    let updated = state.store.update_booking(&id, &new).await?;

    Ok(Json(ApiResponse::with_warning(updated, warning)))
}

/// DELETE /bookings/:id
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.store.delete_booking(&id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// Checked before any store call, mirroring the form's inline validation.
fn validate(new: &NewBooking) -> SalonResult<()> {
    if new.is_me_time {
        if new
            .me_time_title
            .as_deref()
            .is_none_or(|title| title.trim().is_empty())
        {
            return Err(SalonError::Validation(
                "A personal-time block needs a title".into(),
            ));
        }
    } else {
        if new.client_id.is_none() {
            return Err(SalonError::Validation("Pick a client for the booking".into()));
        }
        if new.procedure_ids.is_empty() {
            return Err(SalonError::Validation(
                "Pick at least one procedure".into(),
            ));
        }
    }
    Ok(())
}

/// Advisory overlap check against the same salon-local day.
async fn overlap_warning(
    state: &AppState,
    new: &NewBooking,
    exclude_id: Option<&str>,
) -> Result<Option<String>, AppError> {
    let tz = state.settings.timezone;
    let (day_start, day_end) = day_window(new.date, tz);

    let (bookings, clients, procedures) = tokio::join!(
        state.store.list_bookings(Some((day_start, day_end))),
        state.store.list_clients(),
        state.store.list_procedures(false),
    );
    let (bookings, clients, procedures) = (bookings?, clients?, procedures?);

    let displays = build_displays(&bookings, &clients, &procedures);
    let procedures_by_id: HashMap<String, Procedure> =
        procedures.into_iter().map(|p| (p.id.clone(), p)).collect();

    let duration = resolve_duration_secs(&candidate(new), &procedures_by_id);
    let end = new.date + Duration::seconds(duration);

    Ok(conflict_warning(new.date, end, &displays, exclude_id, tz))
}

/// The payload as a booking, for duration resolution ahead of the write.
fn candidate(new: &NewBooking) -> Booking {
    Booking {
        id: String::new(),
        start: new.date,
        client_id: new.client_id.clone(),
        procedure_ids: new.procedure_ids.clone(),
        custom_duration_secs: new.custom_duration,
        stored_duration_secs: None,
        stored_price: None,
        client_name_lookup: None,
        client_label: None,
        is_me_time: new.is_me_time,
        me_time_title: new.me_time_title.clone(),
    }
}

/// The salon-local day containing `start`, as a UTC interval.
fn day_window(start: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = start
        .with_timezone(&tz)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let day_start = match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST jump; UTC midnight is close enough
        None => midnight.and_utc(),
    };
    (day_start, day_start + Duration::days(1))
}
