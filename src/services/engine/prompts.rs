use crate::models::{BookingRecord, Field};

/// Fixed gallery link sent whenever the customer asks for photos or videos.
pub const VENUE_PREVIEW_LINK: &str = "https://rosewoodbanquets.example.com/gallery";

pub const PRICE_DISCLAIMER: &str = "Pricing depends on the date and the number of guests, \
so I'll share an exact estimate once I have those details.";

pub const ALREADY_BOOKED_FILLER: &str = "You're all set! Your booking is already confirmed. \
Is there something else you need help with?";

pub const CONTEXT_FILLER: &str =
    "No problem at all. We'll be right here whenever you want to plan the next one!";

pub const GENERIC_FILLER: &str =
    "Thanks! Let's keep going with a few more details for your booking.";

const NAME_PROMPT: &str = "Lovely to hear from you! May I know your name, please?";
const OCCASION_PROMPT: &str = "What's the occasion we're hosting? A birthday, baby shower, \
engagement, anniversary, or a corporate do?";
const DATE_PROMPT: &str = "When would you like the hall? A date and rough time of day works.";
const GUEST_PROMPT: &str = "How many guests are you expecting?";
const DECOR_PROMPT: &str = "Would you like us to arrange decorations for the evening?";
const CONTACT_PROMPT: &str =
    "Almost done! Could you share a contact number so we can confirm the slot?";

/// Question for the next missing field, personalized with whatever the record
/// already knows. The guest and date prompts get a prefix; the decoration
/// prompt is replaced outright once the occasion is known.
pub fn prompt_for(field: Field, record: &BookingRecord) -> String {
    match field {
        Field::Name => NAME_PROMPT.to_string(),
        Field::Occasion => OCCASION_PROMPT.to_string(),
        Field::DateTime => match record.occasion {
            Some(occasion) => format!("{} sounds lovely! {DATE_PROMPT}", occasion.label()),
            None => DATE_PROMPT.to_string(),
        },
        Field::GuestCount => match record.first_name() {
            Some(first) => format!("Thanks, {first}! {GUEST_PROMPT}"),
            None => GUEST_PROMPT.to_string(),
        },
        Field::Decoration => match record.occasion {
            Some(occasion) => format!(
                "Shall we do up the hall to match the {} theme, or keep it simple?",
                occasion.label().to_lowercase()
            ),
            None => DECOR_PROMPT.to_string(),
        },
        Field::Contact => CONTACT_PROMPT.to_string(),
    }
}
