use crate::catalog::{PairIndex, Room};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Occupied,
    MyBooking,
    /// Released by a delete; equivalent to no booking at all.
    Free,
}

/// Identity of a booking: one room, one pair, one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingKey {
    pub room_id: String,
    pub date: NaiveDate,
    pub pair: PairIndex,
}

impl BookingKey {
    pub fn new(room_id: impl Into<String>, date: NaiveDate, pair: PairIndex) -> Self {
        BookingKey {
            room_id: room_id.into(),
            date,
            pair,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub date: NaiveDate,
    pub pair: PairIndex,
    pub subject: String,
    pub teacher: String,
    pub is_my_booking: bool,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        key: BookingKey,
        subject: impl Into<String>,
        teacher: impl Into<String>,
        mine: bool,
    ) -> Self {
        Booking {
            id: Uuid::new_v4().to_string(),
            room_id: key.room_id,
            date: key.date,
            pair: key.pair,
            subject: subject.into(),
            teacher: teacher.into(),
            is_my_booking: mine,
            status: status_for(mine),
        }
    }

    pub fn key(&self) -> BookingKey {
        BookingKey::new(self.room_id.clone(), self.date, self.pair)
    }

    /// False once the booking has been released.
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Free
    }

    fn release(&mut self) {
        self.subject.clear();
        self.teacher.clear();
        self.is_my_booking = false;
        self.status = BookingStatus::Free;
    }
}

fn status_for(mine: bool) -> BookingStatus {
    if mine {
        BookingStatus::MyBooking
    } else {
        BookingStatus::Occupied
    }
}

/// Partial booking as submitted by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub room_id: String,
    pub pair: PairIndex,
    pub date: NaiveDate,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub mine: Option<bool>,
}

impl BookingDraft {
    pub fn key(&self) -> BookingKey {
        BookingKey::new(self.room_id.clone(), self.date, self.pair)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("subject is required")]
    MissingSubject,
    #[error("room not found: {0}")]
    UnknownRoom(String),
}

impl BookingError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            BookingError::MissingSubject => "subject",
            BookingError::UnknownRoom(_) => "roomId",
        }
    }
}

/// In-memory booking collection. At most one record per [`BookingKey`].
#[derive(Debug, Clone)]
pub struct BookingStore {
    bookings: BTreeMap<BookingKey, Booking>,
    default_teacher: String,
}

impl BookingStore {
    pub fn new(default_teacher: impl Into<String>) -> Self {
        BookingStore {
            bookings: BTreeMap::new(),
            default_teacher: default_teacher.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn get(&self, key: &BookingKey) -> Option<&Booking> {
        self.bookings.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.iter().filter(|b| b.date == date).cloned().collect()
    }

    /// Inserts only when the key is not taken yet. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, booking: Booking) -> bool {
        let key = booking.key();
        if self.bookings.contains_key(&key) {
            return false;
        }
        self.bookings.insert(key, booking);
        true
    }

    /// Creates or overwrites the booking at the draft's key. An existing record
    /// keeps its id; subject, teacher and ownership are replaced.
    pub fn save(&mut self, rooms: &[Room], draft: BookingDraft) -> Result<&Booking, BookingError> {
        let subject = draft.subject.trim();
        if subject.is_empty() {
            return Err(BookingError::MissingSubject);
        }
        if !rooms.iter().any(|r| r.id == draft.room_id) {
            return Err(BookingError::UnknownRoom(draft.room_id));
        }

        let teacher = match draft.teacher.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => self.default_teacher.clone(),
        };
        let mine = draft.mine.unwrap_or(true);
        let key = draft.key();

        let booking = self
            .bookings
            .entry(key.clone())
            .and_modify(|b| {
                b.subject = subject.to_string();
                b.teacher = teacher.clone();
                b.is_my_booking = mine;
                b.status = status_for(mine);
            })
            .or_insert_with(|| Booking::new(key, subject, teacher.clone(), mine));
        debug!(id = %booking.id, room = %booking.room_id, pair = %booking.pair, "booking saved");
        Ok(booking)
    }

    /// Releases the booking at `key` back to the free state. The record stays
    /// so the key can be queried again. Returns whether anything changed.
    pub fn delete(&mut self, key: &BookingKey) -> bool {
        match self.bookings.get_mut(key) {
            Some(b) if b.is_active() => {
                b.release();
                true
            }
            _ => false,
        }
    }
}
