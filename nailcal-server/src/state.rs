//! Shared application state.

use std::sync::Arc;

use nailcal_airtable::AirtableClient;
use nailcal_core::Clock;

use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AirtableClient>,
    pub settings: Arc<Settings>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: AirtableClient, settings: Settings, clock: impl Clock + 'static) -> Self {
        AppState {
            store: Arc::new(store),
            settings: Arc::new(settings),
            clock: Arc::new(clock),
        }
    }
}
