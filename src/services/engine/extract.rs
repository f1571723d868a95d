use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{BookingRecord, Decoration, Occasion};

// Matching runs on the lowercased text; captured values come from the
// original-case text so names keep their spelling.

static NAME_INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:name is|this is|i am|i'm)\s+([a-zA-Z][a-zA-Z ]*)").unwrap()
});

// A whole message that is just a short alphabetic phrase is taken as a name.
static BARE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]{1,30}$").unwrap());

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}(?:st|nd|rd|th)?|\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}(?:/\d{2,4})?)\b",
    )
    .unwrap()
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d{1,2}(?::\d{2})?\s*(?:am|pm)|morning|afternoon|evening|night|noon|slot)\b")
        .unwrap()
});

static GUEST_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(?:for|about|around)\s+)?(\d{2,3})\s*(?:guests?|people|pax|heads|persons?)\b")
        .unwrap()
});

static DECOR_EXPLICIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)decor[a-z]*\s*[:\-]?\s*(yes|no)\b").unwrap());

static PHONE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s-]{8,}").unwrap());

const MIN_CONTACT_DIGITS: usize = 9;

/// One extraction pass over an utterance. Pure and total: unset fields are
/// filled when a heuristic matches, set fields are never touched, and a
/// non-match is simply "not provided yet".
pub fn extract(message: &str, record: &BookingRecord) -> BookingRecord {
    if record.booking_complete {
        return record.clone();
    }

    let trimmed = message.trim();
    let lower = trimmed.to_lowercase();

    let mut updated = record.clone();
    if updated.name.is_none() {
        updated.name = extract_name(trimmed);
    }
    if updated.occasion.is_none() {
        updated.occasion = extract_occasion(&lower);
    }
    if updated.date_time.is_none() {
        updated.date_time = extract_date_time(trimmed, &lower);
    }
    if updated.guest_count.is_none() {
        updated.guest_count = extract_guest_count(trimmed);
    }
    if updated.decoration.is_none() {
        updated.decoration = extract_decoration(&lower);
    }
    if updated.contact.is_none() {
        updated.contact = extract_contact(trimmed);
    }
    updated
}

fn extract_name(trimmed: &str) -> Option<String> {
    if let Some(caps) = NAME_INTRO.captures(trimmed) {
        return Some(title_case(caps[1].trim()));
    }
    if BARE_NAME.is_match(trimmed) {
        return Some(title_case(trimmed));
    }
    None
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

const OCCASION_KEYWORDS: &[(Occasion, &[&str])] = &[
    (Occasion::Birthday, &["birthday", "bday"]),
    (Occasion::BabyShower, &["baby shower", "babyshower", "baby-shower"]),
    (Occasion::Engagement, &["engagement", "ring ceremony"]),
    (Occasion::Anniversary, &["anniversary"]),
    (Occasion::Corporate, &["corporate", "office party", "company event", "team outing"]),
];

fn extract_occasion(lower: &str) -> Option<Occasion> {
    for (occasion, keywords) in OCCASION_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return Some(*occasion);
        }
    }
    if lower.contains("other") {
        return Some(Occasion::Other);
    }
    None
}

fn extract_date_time(trimmed: &str, lower: &str) -> Option<String> {
    if let Some(date) = DATE_PATTERN.find(trimmed) {
        let composed = match TIME_PATTERN.find(trimmed) {
            Some(time) => format!("{} {}", date.as_str(), time.as_str()),
            None => date.as_str().to_string(),
        };
        return Some(composed.trim().to_string());
    }
    // No recognizable date, but a loose hint: keep the customer's own words.
    if lower.contains("tomorrow") || lower.contains("weekend") {
        return Some(trimmed.to_string());
    }
    None
}

fn extract_guest_count(trimmed: &str) -> Option<u32> {
    GUEST_COUNT
        .captures(trimmed)
        .and_then(|caps| caps[1].parse().ok())
}

fn extract_decoration(lower: &str) -> Option<Decoration> {
    if lower.contains("no decor") || lower.contains("no decoration") {
        return Some(Decoration::No);
    }
    if lower.contains("decor") {
        if let Some(caps) = DECOR_EXPLICIT.captures(lower) {
            return Some(match &caps[1] {
                "yes" => Decoration::Yes,
                _ => Decoration::No,
            });
        }
    }
    if lower.contains("decor") || lower.contains("theme") {
        return Some(Decoration::Yes);
    }
    // Shadowed by the branch above; kept so the matcher table stays exhaustive.
    if lower.contains("yes decoration") {
        return Some(Decoration::Yes);
    }
    None
}

fn extract_contact(trimmed: &str) -> Option<String> {
    for token in PHONE_TOKEN.find_iter(trimmed) {
        let cleaned: String = token
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        let digit_count = cleaned.chars().filter(char::is_ascii_digit).count();
        if digit_count >= MIN_CONTACT_DIGITS {
            return Some(cleaned);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_into(message: &str) -> BookingRecord {
        extract(message, &BookingRecord::default())
    }

    #[test]
    fn name_from_introduction_patterns() {
        assert_eq!(extract_into("I am Rohan").name.as_deref(), Some("Rohan"));
        assert_eq!(extract_into("hi, my name is priya").name.as_deref(), Some("Priya"));
        assert_eq!(extract_into("this is ARJUN MEHTA").name.as_deref(), Some("Arjun Mehta"));
        assert_eq!(extract_into("I'm kavya").name.as_deref(), Some("Kavya"));
    }

    #[test]
    fn bare_alphabetic_message_is_a_name() {
        assert_eq!(extract_into("rohan sharma").name.as_deref(), Some("Rohan Sharma"));
        // Too short, too long, or non-alphabetic: not a name.
        assert_eq!(extract_into("r").name, None);
        assert_eq!(extract_into("a very long message that is well past the length cap").name, None);
        assert_eq!(extract_into("call me at 9").name, None);
    }

    #[test]
    fn name_is_never_overwritten() {
        let record = BookingRecord {
            name: Some("Priya".to_string()),
            ..Default::default()
        };
        let updated = extract("actually my name is Rahul", &record);
        assert_eq!(updated.name.as_deref(), Some("Priya"));
    }

    #[test]
    fn occasion_keywords() {
        assert_eq!(extract_into("it's her birthday!").occasion, Some(Occasion::Birthday));
        assert_eq!(extract_into("planning a baby shower").occasion, Some(Occasion::BabyShower));
        assert_eq!(extract_into("our engagement").occasion, Some(Occasion::Engagement));
        assert_eq!(extract_into("25th anniversary").occasion, Some(Occasion::Anniversary));
        assert_eq!(extract_into("corporate offsite").occasion, Some(Occasion::Corporate));
        assert_eq!(extract_into("something other than these").occasion, Some(Occasion::Other));
        assert_eq!(extract_into("just asking").occasion, None);
    }

    #[test]
    fn date_with_time_of_day() {
        assert_eq!(
            extract_into("we need it on 2024-12-05 evening").date_time.as_deref(),
            Some("2024-12-05 evening")
        );
        assert_eq!(
            extract_into("book for 15th december 7pm please").date_time.as_deref(),
            Some("15th december 7pm")
        );
        assert_eq!(extract_into("maybe 12/5?").date_time.as_deref(), Some("12/5"));
    }

    #[test]
    fn date_without_time_stands_alone() {
        assert_eq!(extract_into("around dec 20").date_time.as_deref(), Some("dec 20"));
    }

    #[test]
    fn loose_date_hints_keep_the_whole_message() {
        assert_eq!(
            extract_into("sometime this weekend would be great").date_time.as_deref(),
            Some("sometime this weekend would be great")
        );
        assert_eq!(
            extract_into("tomorrow night?").date_time.as_deref(),
            Some("tomorrow night?")
        );
    }

    #[test]
    fn guest_count_with_unit_words() {
        assert_eq!(extract_into("around 75 guests").guest_count, Some(75));
        assert_eq!(extract_into("for 120 people").guest_count, Some(120));
        assert_eq!(extract_into("50 pax").guest_count, Some(50));
        assert_eq!(extract_into("about 30 heads").guest_count, Some(30));
    }

    #[test]
    fn guest_count_needs_two_or_three_digits_and_a_unit() {
        assert_eq!(extract_into("5 guests").guest_count, None);
        assert_eq!(extract_into("1000 guests").guest_count, None);
        assert_eq!(extract_into("75 balloons").guest_count, None);
    }

    #[test]
    fn decoration_branches() {
        assert_eq!(extract_into("no decoration please").decoration, Some(Decoration::No));
        assert_eq!(extract_into("decoration: no").decoration, Some(Decoration::No));
        assert_eq!(extract_into("decoration yes").decoration, Some(Decoration::Yes));
        assert_eq!(extract_into("we'd love some decor").decoration, Some(Decoration::Yes));
        assert_eq!(extract_into("a princess theme maybe").decoration, Some(Decoration::Yes));
        assert_eq!(extract_into("yes").decoration, None);
    }

    #[test]
    fn contact_is_normalized_and_length_checked() {
        assert_eq!(
            extract_into("+91 98765 43210").contact.as_deref(),
            Some("+919876543210")
        );
        assert_eq!(
            extract_into("reach me on 98765-43210").contact.as_deref(),
            Some("9876543210")
        );
        // Too few digits once separators are stripped.
        assert_eq!(extract_into("12345678").contact, None);
    }

    #[test]
    fn iso_date_is_not_mistaken_for_a_phone_number() {
        let record = extract_into("we need it on 2024-12-05, call +91 98765 43210");
        assert_eq!(record.contact.as_deref(), Some("+919876543210"));
        assert_eq!(record.date_time.as_deref(), Some("2024-12-05"));
    }

    #[test]
    fn complete_record_is_returned_untouched() {
        let record = BookingRecord {
            name: Some("Asha".to_string()),
            occasion: Some(Occasion::Birthday),
            date_time: Some("dec 5 evening".to_string()),
            guest_count: Some(40),
            decoration: Some(Decoration::Yes),
            contact: Some("+919876543210".to_string()),
            booking_complete: true,
        };
        let updated = extract("this is Someone Else, 80 guests", &record);
        assert_eq!(updated, record);
    }

    #[test]
    fn extraction_is_monotonic() {
        let step1 = extract_into("I am Rohan, it's a birthday");
        assert_eq!(step1.name.as_deref(), Some("Rohan"));
        assert_eq!(step1.occasion, Some(Occasion::Birthday));

        let step2 = extract("for an anniversary with 90 guests", &step1);
        // Occasion stays; only the unset guest count moves.
        assert_eq!(step2.occasion, Some(Occasion::Birthday));
        assert_eq!(step2.guest_count, Some(90));
        assert_eq!(step2.name.as_deref(), Some("Rohan"));
    }
}
