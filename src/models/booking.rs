use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The six booking fields, in the order the assistant asks for them.
/// "Next missing field" is always the first unset field in this order,
/// no matter which order the customer volunteered things in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Occasion,
    DateTime,
    GuestCount,
    Decoration,
    Contact,
}

pub const FIELD_PRIORITY: [Field; 6] = [
    Field::Name,
    Field::Occasion,
    Field::DateTime,
    Field::GuestCount,
    Field::Decoration,
    Field::Contact,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Birthday,
    BabyShower,
    Engagement,
    Anniversary,
    Corporate,
    Other,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Birthday => "birthday",
            Occasion::BabyShower => "baby_shower",
            Occasion::Engagement => "engagement",
            Occasion::Anniversary => "anniversary",
            Occasion::Corporate => "corporate",
            Occasion::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "birthday" => Occasion::Birthday,
            "baby_shower" => Occasion::BabyShower,
            "engagement" => Occasion::Engagement,
            "anniversary" => Occasion::Anniversary,
            "corporate" => Occasion::Corporate,
            _ => Occasion::Other,
        }
    }

    /// Display form used inside prompts and the confirmation.
    pub fn label(&self) -> &'static str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::BabyShower => "Baby shower",
            Occasion::Engagement => "Engagement",
            Occasion::Anniversary => "Anniversary",
            Occasion::Corporate => "Corporate event",
            Occasion::Other => "Special day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Yes,
    No,
}

impl Decoration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decoration::Yes => "yes",
            Decoration::No => "no",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "yes" => Decoration::Yes,
            _ => Decoration::No,
        }
    }
}

/// Accumulated state of one reservation conversation.
///
/// Every field starts unset and is written at most once: the first successful
/// extraction wins and is never overwritten. Once `booking_complete` is true
/// the record is frozen history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: Option<String>,
    pub occasion: Option<Occasion>,
    pub date_time: Option<String>,
    pub guest_count: Option<u32>,
    pub decoration: Option<Decoration>,
    pub contact: Option<String>,
    #[serde(default)]
    pub booking_complete: bool,
}

impl BookingRecord {
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name.is_some(),
            Field::Occasion => self.occasion.is_some(),
            Field::DateTime => self.date_time.is_some(),
            Field::GuestCount => self.guest_count.is_some(),
            Field::Decoration => self.decoration.is_some(),
            Field::Contact => self.contact.is_some(),
        }
    }

    pub fn first_unset_field(&self) -> Option<Field> {
        FIELD_PRIORITY.iter().copied().find(|f| !self.is_set(*f))
    }

    pub fn first_name(&self) -> Option<&str> {
        self.name.as_deref().and_then(|n| n.split_whitespace().next())
    }
}

/// A completed reservation, written once the record fills up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub session_id: String,
    pub customer_name: String,
    pub occasion: Occasion,
    pub date_time: String,
    pub guest_count: u32,
    pub decoration: Decoration,
    pub contact: String,
    pub price_low: Option<u32>,
    pub price_high: Option<u32>,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_asks_for_name_first() {
        let record = BookingRecord::default();
        assert_eq!(record.first_unset_field(), Some(Field::Name));
    }

    #[test]
    fn missing_field_follows_priority_not_fill_order() {
        // Contact and guest count arrived early; name is still the next ask.
        let record = BookingRecord {
            contact: Some("+919876543210".to_string()),
            guest_count: Some(50),
            ..Default::default()
        };
        assert_eq!(record.first_unset_field(), Some(Field::Name));

        let record = BookingRecord {
            name: Some("Asha Rao".to_string()),
            occasion: Some(Occasion::Birthday),
            contact: Some("+919876543210".to_string()),
            ..Default::default()
        };
        assert_eq!(record.first_unset_field(), Some(Field::DateTime));
    }

    #[test]
    fn full_record_has_no_missing_field() {
        let record = BookingRecord {
            name: Some("Asha".to_string()),
            occasion: Some(Occasion::Anniversary),
            date_time: Some("2024-12-05 evening".to_string()),
            guest_count: Some(75),
            decoration: Some(Decoration::Yes),
            contact: Some("+919876543210".to_string()),
            booking_complete: false,
        };
        assert_eq!(record.first_unset_field(), None);
    }

    #[test]
    fn first_name_takes_leading_token() {
        let record = BookingRecord {
            name: Some("Rohan Kumar Mehta".to_string()),
            ..Default::default()
        };
        assert_eq!(record.first_name(), Some("Rohan"));
    }
}
