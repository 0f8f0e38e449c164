use crate::bookings::{Booking, BookingKey};
use crate::catalog::{Catalog, PairIndex, Room, RoomType};
use chrono::{Datelike, NaiveDate};

const TEACHERS: [&str; 4] = ["Смирнов А.В.", "Козлов К.К.", "Иванова Е.П.", "Петров С.Н."];
const SUBJECTS: [&str; 5] = [
    "Системный анализ",
    "Программирование",
    "Базы данных",
    "Теория вероятностей",
    "Физика",
];

pub fn catalog() -> Catalog {
    Catalog::new(vec![
        Room::new("r1", "Ж", 310, RoomType::Lecture, true, 120),
        Room::new("r2", "Ж", 311, RoomType::Computer, false, 30),
        Room::new("r3", "Ж", 210, RoomType::Practice, true, 25),
        Room::new("r4", "Ж", 215, RoomType::Computer, true, 28),
        Room::new("r5", "А", 101, RoomType::Lecture, true, 200),
        Room::new("r6", "А", 204, RoomType::Practice, false, 30),
        Room::new("r7", "Б", 312, RoomType::Computer, true, 24),
        Room::new("r8", "Б", 405, RoomType::Lecture, false, 90),
    ])
}

fn pair(n: usize) -> Option<PairIndex> {
    PairIndex::new(n as i64).ok()
}

/// Deterministic bookings for one day: the fixed morning/evening lectures in
/// Ж-310, an own booking in Ж-311, and a few rotating pairs elsewhere that
/// depend on the day of the year.
pub fn bookings_for(catalog: &Catalog, date: NaiveDate) -> Vec<Booking> {
    let mut out = Vec::new();
    let mut push = |room_id: &str, p: Option<PairIndex>, subject: &str, teacher: &str, mine: bool| {
        if let Some(p) = p {
            out.push(Booking::new(BookingKey::new(room_id, date, p), subject, teacher, mine));
        }
    };

    push("r1", pair(1), "Системный анализ", "Смирнов А.В.", false);
    push("r2", pair(1), "Лекции (комп.)", "Козлов К.К.", true);
    push("r1", pair(6), "Программирование", "Смирнов А.В.", false);

    let seed = date.ordinal() as usize;
    for (i, room) in catalog.rooms().iter().enumerate().skip(2) {
        if (seed + i) % 3 == 0 {
            continue;
        }
        let p = pair((seed + i * 2) % 6 + 1);
        let subject = SUBJECTS[(seed + i) % SUBJECTS.len()];
        let teacher = TEACHERS[(seed / 2 + i) % TEACHERS.len()];
        push(&room.id, p, subject, teacher, false);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn template_bookings_present_every_day() {
        let catalog = catalog();
        for offset in 0..10 {
            let date = NaiveDate::from_ymd_opt(2024, 9, 1).expect("date") + chrono::Days::new(offset);
            let bookings = bookings_for(&catalog, date);
            assert!(bookings.iter().any(|b| b.room_id == "r2" && b.is_my_booking));
            assert_eq!(bookings.iter().filter(|b| b.room_id == "r1").count(), 2);
            assert!(bookings.iter().all(|b| b.date == date));
        }
    }

    #[test]
    fn at_most_one_booking_per_key() {
        let catalog = catalog();
        let date = NaiveDate::from_ymd_opt(2024, 10, 17).expect("date");
        let bookings = bookings_for(&catalog, date);
        let keys: HashSet<BookingKey> = bookings.iter().map(Booking::key).collect();
        assert_eq!(keys.len(), bookings.len());
        assert!(bookings.iter().all(|b| catalog.room(&b.room_id).is_some()));
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = catalog();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("date");
        let a: Vec<(String, u8)> = bookings_for(&catalog, date).iter().map(|b| (b.room_id.clone(), b.pair.get())).collect();
        let b: Vec<(String, u8)> = bookings_for(&catalog, date).iter().map(|b| (b.room_id.clone(), b.pair.get())).collect();
        assert_eq!(a, b);
    }
}
