use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of teaching pairs in a day. Every room has exactly this many cells.
pub const PAIRS_PER_DAY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Lecture,
    Computer,
    Practice,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("pair must be between 1 and {max}, got {0}", max = PAIRS_PER_DAY)]
pub struct InvalidPair(pub i64);

/// 1-based index of a daily pair. Only 1..=6 can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PairIndex(u8);

impl PairIndex {
    pub const ALL: [PairIndex; PAIRS_PER_DAY] = [
        PairIndex(1),
        PairIndex(2),
        PairIndex(3),
        PairIndex(4),
        PairIndex(5),
        PairIndex(6),
    ];

    pub fn new(n: i64) -> Result<Self, InvalidPair> {
        if (1..=PAIRS_PER_DAY as i64).contains(&n) {
            Ok(PairIndex(n as u8))
        } else {
            Err(InvalidPair(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for PairIndex {
    type Error = InvalidPair;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        PairIndex::new(n)
    }
}

impl From<PairIndex> for u8 {
    fn from(p: PairIndex) -> u8 {
        p.0
    }
}

impl fmt::Display for PairIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub pair: PairIndex,
    pub start_time: &'static str,
    pub end_time: &'static str,
}

pub const TIME_SLOTS: [TimeSlot; PAIRS_PER_DAY] = [
    TimeSlot { pair: PairIndex(1), start_time: "09:00", end_time: "10:30" },
    TimeSlot { pair: PairIndex(2), start_time: "10:45", end_time: "12:15" },
    TimeSlot { pair: PairIndex(3), start_time: "12:30", end_time: "14:00" },
    TimeSlot { pair: PairIndex(4), start_time: "14:15", end_time: "15:45" },
    TimeSlot { pair: PairIndex(5), start_time: "16:00", end_time: "17:30" },
    TimeSlot { pair: PairIndex(6), start_time: "17:45", end_time: "19:15" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    /// Display code, e.g. `Ж-310`.
    pub code: String,
    pub building: String,
    pub floor: u8,
    #[serde(rename = "type")]
    pub kind: RoomType,
    pub has_projector: bool,
    pub capacity: u32,
}

impl Room {
    /// Builds a room from its building letter and three-digit number; the
    /// floor is the hundreds digit.
    pub fn new(
        id: impl Into<String>,
        building: &str,
        number: u16,
        kind: RoomType,
        has_projector: bool,
        capacity: u32,
    ) -> Self {
        Room {
            id: id.into(),
            code: format!("{}-{:03}", building, number),
            building: building.to_string(),
            floor: (number / 100) as u8,
            kind,
            has_projector,
            capacity,
        }
    }

    /// Numeric part of the display code (`Ж-310` -> 310). Leading zeros are
    /// ignored, so `Ж-301` and `Ж-0301` compare equal.
    pub fn code_number(&self) -> Option<u32> {
        let (_, digits) = self.code.split_once('-')?;
        digits.trim().parse().ok()
    }
}

/// Static room reference data. Order is the display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rooms: Vec<Room>,
}

impl Catalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Catalog { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn slots(&self) -> &'static [TimeSlot] {
        &TIME_SLOTS
    }
}
