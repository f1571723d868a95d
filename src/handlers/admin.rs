use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/status
#[derive(Serialize)]
pub struct StatusResponse {
    active_sessions: i64,
    confirmed_bookings: i64,
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let (active_sessions, confirmed_bookings) = {
        let db = state.db.lock().unwrap();
        (
            queries::count_active_conversations(&db)?,
            queries::count_bookings(&db)?,
        )
    };

    Ok(Json(StatusResponse {
        active_sessions,
        confirmed_bookings,
    }))
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    id: String,
    session_id: String,
    customer_name: String,
    occasion: String,
    date_time: String,
    guest_count: u32,
    decoration: String,
    contact: String,
    price_low: Option<u32>,
    price_high: Option<u32>,
    created_at: String,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(&db, limit)?
    };

    let response = bookings
        .into_iter()
        .map(|b| BookingResponse {
            id: b.id,
            session_id: b.session_id,
            customer_name: b.customer_name,
            occasion: b.occasion.as_str().to_string(),
            date_time: b.date_time,
            guest_count: b.guest_count,
            decoration: b.decoration.as_str().to_string(),
            contact: b.contact,
            price_low: b.price_low,
            price_high: b.price_high,
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Ok(Json(response))
}
