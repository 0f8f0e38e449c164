use crate::bookings::Booking;
use crate::catalog::{PairIndex, Room, TimeSlot, PAIRS_PER_DAY};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Active bookings keyed by room id, then (date, pair). Released bookings
/// are left out, so a missing entry always means the cell is free.
#[derive(Debug, Default)]
pub struct BookingIndex<'a> {
    by_room: HashMap<&'a str, HashMap<(NaiveDate, PairIndex), &'a Booking>>,
}

impl<'a> BookingIndex<'a> {
    pub fn new<I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = &'a Booking>,
    {
        let mut by_room: HashMap<&'a str, HashMap<(NaiveDate, PairIndex), &'a Booking>> =
            HashMap::new();
        for b in bookings.into_iter().filter(|b| b.is_active()) {
            by_room
                .entry(b.room_id.as_str())
                .or_default()
                .insert((b.date, b.pair), b);
        }
        BookingIndex { by_room }
    }

    pub fn get(&self, room_id: &str, date: NaiveDate, pair: PairIndex) -> Option<&'a Booking> {
        self.by_room
            .get(room_id)
            .and_then(|slots| slots.get(&(date, pair)))
            .copied()
    }

    /// Number of taken pairs for a room on a day, 0..=6.
    pub fn booked_count(&self, room_id: &str, date: NaiveDate) -> usize {
        PairIndex::ALL
            .iter()
            .filter(|p| self.get(room_id, date, **p).is_some())
            .count()
    }

    pub fn is_fully_booked(&self, room_id: &str, date: NaiveDate) -> bool {
        self.booked_count(room_id, date) >= PAIRS_PER_DAY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellState {
    Free,
    Occupied,
    MyBooking,
}

impl CellState {
    pub fn of(booking: Option<&Booking>) -> CellState {
        match booking {
            None => CellState::Free,
            Some(b) if !b.is_active() => CellState::Free,
            Some(b) if b.is_my_booking => CellState::MyBooking,
            Some(_) => CellState::Occupied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCell {
    pub pair: PairIndex,
    pub state: CellState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

impl ScheduleCell {
    fn new(pair: PairIndex, booking: Option<&Booking>) -> Self {
        let state = CellState::of(booking);
        let booking = booking.filter(|_| state != CellState::Free);
        ScheduleCell {
            pair,
            state,
            booking_id: booking.map(|b| b.id.clone()),
            subject: booking.map(|b| b.subject.clone()),
            teacher: booking.map(|b| b.teacher.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub room: Room,
    pub highlighted: bool,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMatrix {
    pub date: NaiveDate,
    pub pairs: Vec<TimeSlot>,
    pub rows: Vec<ScheduleRow>,
}

/// One row per room, one cell per slot, in the given orders.
pub fn build_matrix(
    rooms: &[Room],
    slots: &[TimeSlot],
    index: &BookingIndex<'_>,
    date: NaiveDate,
) -> ScheduleMatrix {
    let rows = rooms
        .iter()
        .map(|room| ScheduleRow {
            room: room.clone(),
            highlighted: false,
            cells: slots
                .iter()
                .map(|slot| ScheduleCell::new(slot.pair, index.get(&room.id, date, slot.pair)))
                .collect(),
        })
        .collect();

    ScheduleMatrix {
        date,
        pairs: slots.to_vec(),
        rows,
    }
}
