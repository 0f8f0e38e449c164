use crate::catalog::{PairIndex, Room, PAIRS_PER_DAY};
use crate::schedule::BookingIndex;
use chrono::NaiveDate;
use serde::Serialize;

/// Summary counters shown above the schedule grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub rooms_found: usize,
    pub free_slots: usize,
    pub my_bookings: usize,
}

pub fn compute_stats(rooms: &[Room], index: &BookingIndex<'_>, date: NaiveDate) -> ScheduleStats {
    let mut stats = ScheduleStats {
        rooms_found: rooms.len(),
        ..ScheduleStats::default()
    };

    for room in rooms {
        let mut booked = 0;
        for pair in PairIndex::ALL {
            let Some(b) = index.get(&room.id, date, pair) else {
                continue;
            };
            booked += 1;
            if b.is_my_booking {
                stats.my_bookings += 1;
            }
        }
        stats.free_slots += PAIRS_PER_DAY - booked;
    }

    stats
}
