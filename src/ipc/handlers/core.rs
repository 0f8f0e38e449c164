use crate::filter::Filters;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.environment,
            "today": state.config.today,
            "mockBookings": state.config.mock_bookings,
            "bookingCount": state.bookings.len(),
        }),
    )
}

fn handle_filters_default(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "filters": Filters::reset(state.config.today) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "filters.default" => Some(handle_filters_default(state, req)),
        _ => None,
    }
}
