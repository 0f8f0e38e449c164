use crate::bookings::Booking;
use crate::catalog::{Room, RoomType};
use crate::query::RoomQuery;
use crate::schedule::BookingIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomTypeFilter {
    #[default]
    All,
    Lecture,
    Computer,
    Practice,
}

impl RoomTypeFilter {
    pub fn admits(self, kind: RoomType) -> bool {
        match self {
            RoomTypeFilter::All => true,
            RoomTypeFilter::Lecture => kind == RoomType::Lecture,
            RoomTypeFilter::Computer => kind == RoomType::Computer,
            RoomTypeFilter::Practice => kind == RoomType::Practice,
        }
    }
}

/// Current state of the search/filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub room_type: RoomTypeFilter,
    /// `true` requires a projector; `false` and `null` do not constrain.
    #[serde(default)]
    pub has_projector: Option<bool>,
    #[serde(default)]
    pub show_only_free: bool,
    pub date: NaiveDate,
}

impl Filters {
    /// Filter bar after "reset": nothing constrained, showing `date`.
    pub fn reset(date: NaiveDate) -> Self {
        Filters {
            search: String::new(),
            room_type: RoomTypeFilter::All,
            has_projector: None,
            show_only_free: false,
            date,
        }
    }

    fn admits_projector(&self, has_projector: bool) -> bool {
        self.has_projector != Some(true) || has_projector
    }
}

/// Rooms passing every predicate in `filters`, in catalog order.
pub fn filter_rooms<'b, I>(rooms: &[Room], filters: &Filters, bookings: I) -> Vec<Room>
where
    I: IntoIterator<Item = &'b Booking>,
{
    filter_rooms_indexed(rooms, filters, &BookingIndex::new(bookings))
}

pub fn filter_rooms_indexed(rooms: &[Room], filters: &Filters, index: &BookingIndex<'_>) -> Vec<Room> {
    let query = RoomQuery::parse(&filters.search);
    let constrained = !query.is_unconstrained();

    rooms
        .iter()
        .filter(|room| filters.room_type.admits(room.kind))
        .filter(|room| filters.admits_projector(room.has_projector))
        .filter(|room| !constrained || query.matches(room))
        .filter(|room| !filters.show_only_free || !index.is_fully_booked(&room.id, filters.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::BookingKey;
    use crate::catalog::PairIndex;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).expect("date")
    }

    fn catalog() -> Vec<Room> {
        vec![
            Room::new("r1", "Ж", 310, RoomType::Lecture, true, 120),
            Room::new("r2", "Ж", 311, RoomType::Computer, false, 30),
            Room::new("r3", "Ж", 210, RoomType::Practice, true, 25),
            Room::new("r4", "А", 101, RoomType::Lecture, false, 80),
        ]
    }

    fn codes(rooms: &[Room]) -> Vec<&str> {
        rooms.iter().map(|r| r.code.as_str()).collect()
    }

    fn with_search(search: &str) -> Filters {
        Filters {
            search: search.to_string(),
            ..Filters::reset(day())
        }
    }

    fn busy(room: &str, pairs: std::ops::RangeInclusive<i64>) -> Vec<Booking> {
        pairs
            .map(|p| {
                let key = BookingKey::new(room, day(), PairIndex::new(p).expect("pair"));
                Booking::new(key, "Лекция", "Смирнов А.В.", false)
            })
            .collect()
    }

    #[test]
    fn search_scenario_floor_then_full_code_then_projector() {
        let rooms = catalog();
        let none: Vec<Booking> = Vec::new();

        let floor = filter_rooms(&rooms, &with_search("Ж-3"), &none);
        assert_eq!(codes(&floor), vec!["Ж-310", "Ж-311"]);

        let exact = filter_rooms(&rooms, &with_search("Ж-310"), &none);
        assert_eq!(codes(&exact), vec!["Ж-310"]);

        let mut projector = with_search("Ж-3");
        projector.has_projector = Some(true);
        assert_eq!(codes(&filter_rooms(&rooms, &projector, &none)), vec!["Ж-310"]);
    }

    #[test]
    fn empty_search_keeps_catalog_order() {
        let rooms = catalog();
        let all = filter_rooms(&rooms, &with_search("   "), std::iter::empty());
        assert_eq!(all, rooms);
    }

    #[test]
    fn building_and_text_search() {
        let rooms = catalog();
        let none: Vec<Booking> = Vec::new();
        assert_eq!(filter_rooms(&rooms, &with_search("ж"), &none).len(), 3);
        assert_eq!(codes(&filter_rooms(&rooms, &with_search("10"), &none)), vec!["Ж-310", "Ж-210", "А-101"]);
        assert!(filter_rooms(&rooms, &with_search("Б"), &none).is_empty());
    }

    #[test]
    fn room_type_and_projector_false_is_dont_care() {
        let rooms = catalog();
        let none: Vec<Booking> = Vec::new();

        let mut f = Filters::reset(day());
        f.room_type = RoomTypeFilter::Lecture;
        assert_eq!(codes(&filter_rooms(&rooms, &f, &none)), vec!["Ж-310", "А-101"]);

        f.room_type = RoomTypeFilter::All;
        f.has_projector = Some(false);
        assert_eq!(filter_rooms(&rooms, &f, &none).len(), rooms.len());
    }

    #[test]
    fn show_only_free_excludes_only_fully_booked_rooms() {
        let rooms = catalog();
        let mut bookings = busy("r1", 1..=6);
        bookings.extend(busy("r2", 1..=5));

        let mut f = Filters::reset(day());
        f.show_only_free = true;
        let visible = filter_rooms(&rooms, &f, &bookings);
        assert_eq!(codes(&visible), vec!["Ж-311", "Ж-210", "А-101"]);

        f.date = day().succ_opt().expect("next day");
        assert_eq!(filter_rooms(&rooms, &f, &bookings).len(), 4);
    }

    #[test]
    fn filtering_is_idempotent() {
        let rooms = catalog();
        let bookings = busy("r3", 1..=6);
        let mut f = with_search("Ж");
        f.show_only_free = true;
        f.has_projector = Some(true);

        let once = filter_rooms(&rooms, &f, &bookings);
        let twice = filter_rooms(&once, &f, &bookings);
        assert_eq!(once, twice);
        assert_eq!(codes(&once), vec!["Ж-310"]);
    }

    #[test]
    fn filters_deserialize_with_defaults() {
        let f: Filters = serde_json::from_str(r#"{"date":"2024-09-02","hasProjector":null}"#).expect("filters");
        assert_eq!(f, Filters::reset(day()));

        let f: Filters =
            serde_json::from_str(r#"{"date":"2024-09-02","roomType":"computer","hasProjector":true,"showOnlyFree":true,"search":"Ж"}"#)
                .expect("filters");
        assert_eq!(f.room_type, RoomTypeFilter::Computer);
        assert_eq!(f.has_projector, Some(true));
        assert!(f.show_only_free);
    }
}
