pub mod booking;
pub mod conversation;

pub use booking::{Booking, BookingRecord, Decoration, Field, Occasion, FIELD_PRIORITY};
pub use conversation::{Conversation, ConversationMessage};
