use crate::filter::filter_rooms;
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_filters, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::query::RoomQuery;
use serde_json::json;

fn handle_catalog_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "rooms": state.catalog.rooms(),
            "pairs": state.catalog.slots(),
        }),
    )
}

fn handle_query_parse(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let search = match get_required_str(&req.params, "search") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let query = RoomQuery::parse(&search);
    ok(
        &req.id,
        json!({
            "query": query,
            "unconstrained": query.is_unconstrained(),
        }),
    )
}

fn handle_rooms_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let filters = match get_filters(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    state.open_date(filters.date);

    let rooms = filter_rooms(state.catalog.rooms(), &filters, state.bookings.iter());
    ok(&req.id, json!({ "rooms": rooms }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.get" => Some(handle_catalog_get(state, req)),
        "query.parse" => Some(handle_query_parse(state, req)),
        "rooms.search" => Some(handle_rooms_search(state, req)),
        _ => None,
    }
}
