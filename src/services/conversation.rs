use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::db::queries;
use crate::models::{Booking, Conversation, ConversationMessage};
use crate::services::engine;
use crate::services::engine::pricing;
use crate::state::AppState;

// Engine input is capped; anything longer is noise for the matchers anyway.
const MAX_MESSAGE_CHARS: usize = 400;
const SESSION_TTL_MINUTES: i64 = 30;

/// Run one turn for a session: load (or open) the conversation, hand the
/// record and utterance to the engine, persist the outcome, and write a
/// booking row the moment the record completes.
pub fn process_message(
    state: &Arc<AppState>,
    session_id: &str,
    message: &str,
) -> anyhow::Result<(Vec<String>, bool)> {
    let mut conv = {
        let db = state.db.lock().unwrap();
        queries::get_conversation(&db, session_id)?
    }
    .unwrap_or_else(|| new_conversation(session_id));

    let message: String = message.trim().chars().take(MAX_MESSAGE_CHARS).collect();

    let was_complete = conv.record.booking_complete;
    let last_prompt = conv.last_assistant_text().to_string();
    let outcome = engine::run_turn(&conv.record, &message, &last_prompt);

    tracing::info!(
        session = session_id,
        missing = ?outcome.record.first_unset_field(),
        complete = outcome.record.booking_complete,
        "processed turn"
    );

    conv.messages.push(ConversationMessage {
        role: "user".to_string(),
        content: message,
    });
    for response in &outcome.responses {
        conv.messages.push(ConversationMessage {
            role: "assistant".to_string(),
            content: response.clone(),
        });
    }

    if outcome.record.booking_complete && !was_complete {
        let booking = booking_from_record(session_id, &outcome.record);
        {
            let db = state.db.lock().unwrap();
            queries::create_booking(&db, &booking)?;
        }
        tracing::info!(
            session = session_id,
            booking = %booking.id,
            guests = booking.guest_count,
            "booking confirmed"
        );
    }

    conv.record = outcome.record;

    let now = Utc::now().naive_utc();
    conv.last_activity = now;
    conv.expires_at = now + Duration::minutes(SESSION_TTL_MINUTES);

    {
        let db = state.db.lock().unwrap();
        queries::save_conversation(&db, &conv)?;
        let _ = queries::expire_old_conversations(&db);
    }

    Ok((outcome.responses, conv.record.booking_complete))
}

fn new_conversation(session_id: &str) -> Conversation {
    let now = Utc::now().naive_utc();
    Conversation {
        id: session_id.to_string(),
        messages: vec![],
        record: Default::default(),
        last_activity: now,
        expires_at: now + Duration::minutes(SESSION_TTL_MINUTES),
    }
}

fn booking_from_record(session_id: &str, record: &crate::models::BookingRecord) -> Booking {
    let guest_count = record.guest_count.unwrap_or(0);
    let (price_low, price_high) = if guest_count > 0 {
        let (low, high) = pricing::price_band(guest_count);
        (Some(low), Some(high))
    } else {
        (None, None)
    };

    Booking {
        id: uuid::Uuid::new_v4().to_string(),
        session_id: session_id.to_string(),
        customer_name: record.name.clone().unwrap_or_default(),
        occasion: record.occasion.unwrap_or(crate::models::Occasion::Other),
        date_time: record.date_time.clone().unwrap_or_default(),
        guest_count,
        decoration: record.decoration.unwrap_or(crate::models::Decoration::No),
        contact: record.contact.clone().unwrap_or_default(),
        price_low,
        price_high,
        created_at: Utc::now().naive_utc(),
    }
}
