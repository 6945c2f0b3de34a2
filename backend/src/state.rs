use std::sync::Arc;

use crate::{
    config::Config,
    models::calendar::WorkingCalendar,
    services::holiday::{holiday_http_client, CachedHolidayProvider, HolidayProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub holidays: Arc<dyn HolidayProvider>,
}

impl AppState {
    pub fn new(config: Config, holidays: Arc<dyn HolidayProvider>) -> Self {
        Self { config, holidays }
    }

    /// State backed by the remote holiday list named in `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client = holiday_http_client(config.holidays_fetch_timeout())?;
        let provider = CachedHolidayProvider::remote(
            client,
            config.holidays_url.clone(),
            config.holidays_cache_ttl(),
            config.calendar.time_zone,
        );
        Ok(Self::new(config, Arc::new(provider)))
    }

    pub fn calendar(&self) -> &WorkingCalendar {
        &self.config.calendar
    }
}
