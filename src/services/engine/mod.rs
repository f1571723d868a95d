pub mod extract;
pub mod pricing;
pub mod prompts;

use crate::models::BookingRecord;

const MEDIA_KEYWORDS: &[&str] = &["photo", "video", "pictures", "pics", "images"];
const PRICE_KEYWORDS: &[&str] = &["price", "charges", "rate", "cost"];

/// Result of one engine turn: the ordered assistant replies and the updated
/// record. The reply list is never empty (fallback guarantee).
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub responses: Vec<String>,
    pub record: BookingRecord,
}

/// One turn of the slot-filling state machine. Pure: no clock, no I/O, no
/// state beyond the record handed in. `last_prompt` is the previous assistant
/// line, passed explicitly so the engine never inspects rendered history.
pub fn run_turn(record: &BookingRecord, message: &str, last_prompt: &str) -> TurnOutcome {
    let mut updated = extract::extract(message, record);
    let lower = message.to_lowercase();
    let mut responses = Vec::new();

    if MEDIA_KEYWORDS.iter().any(|k| lower.contains(k)) {
        responses.push(format!(
            "Here's a peek at the venue: {}",
            prompts::VENUE_PREVIEW_LINK
        ));
    }

    let missing = updated.first_unset_field();

    // A price question before the date and headcount are in gets a
    // disclaimer plus the next question, ahead of the normal flow.
    let asked_price = PRICE_KEYWORDS.iter().any(|k| lower.contains(k));
    if asked_price && (updated.date_time.is_none() || updated.guest_count.is_none()) {
        responses.push(prompts::PRICE_DISCLAIMER.to_string());
        if let Some(field) = missing {
            responses.push(prompts::prompt_for(field, &updated));
        }
        ensure_fallback(&mut responses, &updated, last_prompt);
        return TurnOutcome { responses, record: updated };
    }

    if missing.is_none() && !updated.booking_complete {
        responses.push(pricing::build_confirmation(&updated));
        updated.booking_complete = true;
        return TurnOutcome { responses, record: updated };
    }

    if let Some(field) = missing {
        responses.push(prompts::prompt_for(field, &updated));
    }

    ensure_fallback(&mut responses, &updated, last_prompt);
    TurnOutcome { responses, record: updated }
}

fn ensure_fallback(responses: &mut Vec<String>, record: &BookingRecord, last_prompt: &str) {
    if !responses.is_empty() {
        return;
    }
    let filler = if record.booking_complete {
        prompts::ALREADY_BOOKED_FILLER
    } else if last_prompt.contains("something else you need") {
        prompts::CONTEXT_FILLER
    } else {
        prompts::GENERIC_FILLER
    };
    responses.push(filler.to_string());
}
