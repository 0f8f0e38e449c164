use crate::bookings::Booking;
use crate::catalog::{Room, TimeSlot};
use crate::filter::{filter_rooms_indexed, Filters};
use crate::metrics::{compute_stats, ScheduleStats};
use crate::query::highlights;
use crate::schedule::{build_matrix, BookingIndex, ScheduleMatrix};
use serde::Serialize;

/// Everything the schedule screen renders for one filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub rooms: Vec<Room>,
    pub matrix: ScheduleMatrix,
    pub stats: ScheduleStats,
}

/// Recomputes the view from scratch. Bookings are indexed once and shared by
/// the filter, the matrix and the counters.
pub fn evaluate<'b, I>(rooms: &[Room], slots: &[TimeSlot], filters: &Filters, bookings: I) -> ScheduleView
where
    I: IntoIterator<Item = &'b Booking>,
{
    let index = BookingIndex::new(bookings);
    let visible = filter_rooms_indexed(rooms, filters, &index);

    let mut matrix = build_matrix(&visible, slots, &index, filters.date);
    for row in &mut matrix.rows {
        row.highlighted = highlights(&row.room.code, &filters.search);
    }
    let stats = compute_stats(&visible, &index, filters.date);

    ScheduleView {
        rooms: visible,
        matrix,
        stats,
    }
}
