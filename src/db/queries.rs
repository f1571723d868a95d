use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingRecord, Conversation, ConversationMessage, Decoration, Occasion};

const SQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

fn now_string() -> String {
    Utc::now().naive_utc().format(SQL_DATETIME).to_string()
}

// ── Conversations ──

pub fn get_conversation(conn: &Connection, id: &str) -> anyhow::Result<Option<Conversation>> {
    let mut stmt = conn.prepare(
        "SELECT id, messages, record, last_activity, expires_at
         FROM conversations WHERE id = ?1 AND expires_at > ?2",
    )?;

    let result = stmt.query_row(params![id, now_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    });

    match result {
        Ok((id, messages_json, record_json, last_activity_str, expires_at_str)) => {
            let messages: Vec<ConversationMessage> =
                serde_json::from_str(&messages_json).unwrap_or_default();
            let record: BookingRecord =
                serde_json::from_str(&record_json).unwrap_or_default();

            let last_activity = NaiveDateTime::parse_from_str(&last_activity_str, SQL_DATETIME)
                .unwrap_or_else(|_| Utc::now().naive_utc());
            let expires_at = NaiveDateTime::parse_from_str(&expires_at_str, SQL_DATETIME)
                .unwrap_or_else(|_| Utc::now().naive_utc());

            Ok(Some(Conversation {
                id,
                messages,
                record,
                last_activity,
                expires_at,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_conversation(conn: &Connection, conv: &Conversation) -> anyhow::Result<()> {
    let messages_json = serde_json::to_string(&conv.messages)?;
    let record_json = serde_json::to_string(&conv.record)?;
    let last_activity = conv.last_activity.format(SQL_DATETIME).to_string();
    let expires_at = conv.expires_at.format(SQL_DATETIME).to_string();

    conn.execute(
        "INSERT INTO conversations (id, messages, record, last_activity, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
           messages = excluded.messages,
           record = excluded.record,
           last_activity = excluded.last_activity,
           expires_at = excluded.expires_at",
        params![conv.id, messages_json, record_json, last_activity, expires_at],
    )?;
    Ok(())
}

pub fn expire_old_conversations(conn: &Connection) -> anyhow::Result<usize> {
    let count = conn.execute(
        "DELETE FROM conversations WHERE expires_at <= ?1",
        params![now_string()],
    )?;
    Ok(count)
}

pub fn count_active_conversations(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM conversations WHERE expires_at > ?1",
        params![now_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.format(SQL_DATETIME).to_string();

    conn.execute(
        "INSERT INTO bookings (id, session_id, customer_name, occasion, date_time,
                               guest_count, decoration, contact, price_low, price_high, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            booking.id,
            booking.session_id,
            booking.customer_name,
            booking.occasion.as_str(),
            booking.date_time,
            booking.guest_count,
            booking.decoration.as_str(),
            booking.contact,
            booking.price_low,
            booking.price_high,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_bookings(conn: &Connection, limit: i64) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, customer_name, occasion, date_time,
                guest_count, decoration, contact, price_low, price_high, created_at
         FROM bookings ORDER BY created_at DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        let occasion_str: String = row.get(3)?;
        let decoration_str: String = row.get(6)?;
        let created_at_str: String = row.get(10)?;
        Ok(Booking {
            id: row.get(0)?,
            session_id: row.get(1)?,
            customer_name: row.get(2)?,
            occasion: Occasion::parse(&occasion_str),
            date_time: row.get(4)?,
            guest_count: row.get(5)?,
            decoration: Decoration::parse(&decoration_str),
            contact: row.get(7)?,
            price_low: row.get(8)?,
            price_high: row.get(9)?,
            created_at: NaiveDateTime::parse_from_str(&created_at_str, SQL_DATETIME)
                .unwrap_or_else(|_| Utc::now().naive_utc()),
        })
    })?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn count_bookings(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    Ok(count)
}
