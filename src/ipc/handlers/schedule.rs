use crate::engine::evaluate;
use crate::ipc::error::ok;
use crate::ipc::helpers::get_filters;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_schedule_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let filters = match get_filters(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    state.open_date(filters.date);

    let view = evaluate(
        state.catalog.rooms(),
        state.catalog.slots(),
        &filters,
        state.bookings.iter(),
    );
    ok(
        &req.id,
        json!({
            "date": view.matrix.date,
            "pairs": view.matrix.pairs,
            "rows": view.matrix.rows,
            "stats": view.stats,
        }),
    )
}

fn handle_stats_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let filters = match get_filters(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    state.open_date(filters.date);

    let view = evaluate(
        state.catalog.rooms(),
        state.catalog.slots(),
        &filters,
        state.bookings.iter(),
    );
    ok(&req.id, json!({ "stats": view.stats }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schedule.get" => Some(handle_schedule_get(state, req)),
        "stats.get" => Some(handle_stats_get(state, req)),
        _ => None,
    }
}
