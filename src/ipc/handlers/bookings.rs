use crate::bookings::{BookingDraft, BookingError};
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_booking_key, get_date, get_pair, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

fn booking_error(e: BookingError) -> HandlerErr {
    match e {
        BookingError::MissingSubject => HandlerErr {
            code: "validation_failed",
            message: e.to_string(),
            details: Some(json!({ "fields": { e.field(): "required" } })),
        },
        BookingError::UnknownRoom(ref room_id) => HandlerErr {
            code: "not_found",
            message: e.to_string(),
            details: Some(json!({ "roomId": room_id })),
        },
    }
}

fn bookings_on(state: &AppState, date: NaiveDate) -> serde_json::Value {
    json!(state.bookings.on_date(date))
}

fn parse_draft(params: &serde_json::Value) -> Result<BookingDraft, HandlerErr> {
    let teacher = match params.get("teacher") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(
            v.as_str()
                .ok_or_else(|| HandlerErr::bad_params("teacher must be string or null"))?
                .to_string(),
        ),
    };
    let mine = match params.get("mine") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(
            v.as_bool()
                .ok_or_else(|| HandlerErr::bad_params("mine must be boolean or null"))?,
        ),
    };
    Ok(BookingDraft {
        room_id: get_required_str(params, "roomId")?,
        pair: get_pair(params, "pair")?,
        date: get_date(params, "date")?,
        subject: params
            .get("subject")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        teacher,
        mine,
    })
}

fn handle_bookings_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let date = match get_date(&req.params, "date") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    state.open_date(date);
    ok(&req.id, json!({ "bookings": bookings_on(state, date) }))
}

fn handle_bookings_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let key = match get_booking_key(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    state.open_date(key.date);

    let booking = state.bookings.get(&key).filter(|b| b.is_active());
    // Free cells and own bookings open in the editor; other people's are read-only.
    let editable = booking.map(|b| b.is_my_booking).unwrap_or(true);
    ok(
        &req.id,
        json!({
            "booking": booking,
            "room": state.catalog.room(&key.room_id),
            "editable": editable,
        }),
    )
}

fn handle_bookings_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft = match parse_draft(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let date = draft.date;
    state.open_date(date);

    let saved = match state.bookings.save(state.catalog.rooms(), draft) {
        Ok(b) => b.clone(),
        Err(e) => return booking_error(e).response(&req.id),
    };
    info!(id = %saved.id, room = %saved.room_id, %date, pair = %saved.pair, "booking saved");

    ok(
        &req.id,
        json!({
            "booking": saved,
            "bookings": bookings_on(state, date),
        }),
    )
}

fn handle_bookings_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let key = match get_booking_key(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    state.open_date(key.date);

    let changed = state.bookings.delete(&key);
    info!(room = %key.room_id, date = %key.date, pair = %key.pair, changed, "booking released");

    ok(
        &req.id,
        json!({
            "changed": changed,
            "bookings": bookings_on(state, key.date),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "bookings.list" => Some(handle_bookings_list(state, req)),
        "bookings.get" => Some(handle_bookings_get(state, req)),
        "bookings.save" => Some(handle_bookings_save(state, req)),
        "bookings.delete" => Some(handle_bookings_delete(state, req)),
        _ => None,
    }
}
