use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::bookings::BookingStore;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::mock;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Process-wide state. The booking store has no other owner.
pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub bookings: BookingStore,
    seeded: HashSet<NaiveDate>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let bookings = BookingStore::new(config.default_teacher.clone());
        AppState {
            config,
            catalog: mock::catalog(),
            bookings,
            seeded: HashSet::new(),
        }
    }

    /// Seeds generated bookings for `date` the first time it is opened.
    /// Later calls keep whatever the user saved or released.
    pub fn open_date(&mut self, date: NaiveDate) {
        if !self.config.mock_bookings || !self.seeded.insert(date) {
            return;
        }
        let mut inserted = 0;
        for b in mock::bookings_for(&self.catalog, date) {
            if self.bookings.insert_if_absent(b) {
                inserted += 1;
            }
        }
        debug!(%date, inserted, "seeded mock bookings");
    }
}
