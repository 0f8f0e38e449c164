use crate::catalog::Room;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Structured form of a room search. Produced by [`RoomQuery::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoomQuery {
    /// `Ж`, `Ж-3` or `Ж-310`.
    #[serde(rename_all = "camelCase")]
    Structured {
        building: String,
        floor: Option<u8>,
        room: Option<u8>,
    },
    /// Anything else; matched as a case-insensitive substring. Keeps the
    /// caller's text as typed.
    Text { text: String },
}

// Building letter, then optionally `-<floor digit>`, then optionally two
// room digits. Anchored, so a string has exactly one reading.
fn room_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-ZА-ЯЁ])(?:-([0-9])([0-9]{2})?)?$").expect("room code pattern is valid")
    })
}

/// Trim, upper-case and drop internal whitespace: `" ж - 3 10 "` -> `"Ж-310"`.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

impl RoomQuery {
    pub fn parse(raw: &str) -> RoomQuery {
        let s = normalize(raw);
        let Some(caps) = room_code_pattern().captures(&s) else {
            return RoomQuery::Text {
                text: raw.to_string(),
            };
        };

        let digit = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());
        RoomQuery::Structured {
            building: caps[1].to_string(),
            floor: digit(2),
            room: digit(3),
        }
    }

    /// True for blank text, which places no constraint on rooms.
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, RoomQuery::Text { text } if text.trim().is_empty())
    }

    pub fn matches(&self, room: &Room) -> bool {
        match self {
            RoomQuery::Structured {
                building,
                floor,
                room: number,
            } => {
                if room.building.to_uppercase() != *building {
                    return false;
                }
                let Some(floor) = floor else {
                    return true;
                };
                if room.floor != *floor {
                    return false;
                }
                match number {
                    // Compare numerically so `Ж-301` matches floor 3, room 01.
                    Some(n) => room.code_number() == Some(u32::from(*floor) * 100 + u32::from(*n)),
                    None => true,
                }
            }
            RoomQuery::Text { text } => {
                let needle = text.trim().to_lowercase();
                needle.is_empty()
                    || room.code.to_lowercase().contains(&needle)
                    || room.building.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Whether a room row should be highlighted for the current search text.
/// The search is only trimmed and upper-cased, so inner spaces must match.
/// Blank search highlights nothing.
pub fn highlights(code: &str, search: &str) -> bool {
    let query = search.trim().to_uppercase();
    if query.is_empty() {
        return false;
    }
    code.to_uppercase().contains(&query)
}
