use crate::models::{BookingRecord, Decoration};

const BASE_PRICE: u32 = 18_000;
const PER_GUEST_BAND: u32 = 150;
const PER_GUEST_OVERFLOW: u32 = 250;
const HIGH_BAND_MARGIN: u32 = 6_000;

const INCLUSIONS_LINE: &str = "The package covers the air-conditioned hall, seating and table \
setup, a basic sound system, and our in-house catering team.";
const DECOR_YES_LINE: &str =
    "Our decor team will reach out to plan the theme and setup closer to the date.";
const DECOR_NO_LINE: &str = "We'll keep the hall elegant and minimal, with no extra decoration.";
const ADVANCE_LINE: &str =
    "A 25% advance reserves the date, and the balance is due on the day of the event.";
const CLOSING_LINE: &str = "Shall I go ahead and reserve the slot for you?";
const FLEXIBLE_PRICE_LINE: &str = "We'll keep the pricing flexible and share a tailored quote \
once the guest count firms up.";

/// Low/high estimate for a guest count. The base covers 40 guests; the high
/// end adds a per-head overflow charge past 60 plus a fixed margin.
pub fn price_band(guest_count: u32) -> (u32, u32) {
    let low = BASE_PRICE + guest_count.saturating_sub(40) * PER_GUEST_BAND;
    let high = low + guest_count.saturating_sub(60) * PER_GUEST_OVERFLOW + HIGH_BAND_MARGIN;
    (low, high)
}

/// Indian digit grouping: last three digits, then pairs (1,50,000).
pub fn format_inr(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// The final confirmation block: greeting, price line, inclusions, decor
/// line, advance terms, and the closing offer, separated by blank lines.
pub fn build_confirmation(record: &BookingRecord) -> String {
    let first = record.first_name().unwrap_or("there");
    let date = record.date_time.as_deref().unwrap_or("your chosen date");
    let greeting = format!("Wonderful, {first}! Your booking for {date} is noted.");

    let price_line = match record.guest_count {
        Some(guests) if guests > 0 => {
            let (low, high) = price_band(guests);
            format!(
                "For {guests} guests, the estimate comes to between \u{20B9}{} and \u{20B9}{}.",
                format_inr(low),
                format_inr(high)
            )
        }
        _ => FLEXIBLE_PRICE_LINE.to_string(),
    };

    let decor_line = match record.decoration {
        Some(Decoration::Yes) => DECOR_YES_LINE,
        _ => DECOR_NO_LINE,
    };

    [
        greeting.as_str(),
        price_line.as_str(),
        INCLUSIONS_LINE,
        decor_line,
        ADVANCE_LINE,
        CLOSING_LINE,
    ]
    .join("\n\n")
}
