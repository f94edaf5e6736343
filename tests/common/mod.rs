//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use taskmanager_backend::db::{InMemoryTaskStore, TaskStore};
use taskmanager_backend::services::TaskService;

/// Clock frozen at a chosen local time until a test moves it.
#[derive(Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        let now = Local
            .from_local_datetime(&now)
            .earliest()
            .expect("start time exists in the local zone");
        Self { now: Arc::new(Mutex::new(now)) }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.local().naive_local()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        *self.now.lock().expect("clock lock")
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

/// Mid-June noon: far from any DST switch.
pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, 15)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid start time")
}

pub fn service_with(store: Arc<dyn TaskStore>, clock: &FixedClock) -> TaskService {
    TaskService::new(store, Arc::new(clock.clone()))
}

pub fn in_memory_service(clock: &FixedClock) -> TaskService {
    service_with(Arc::new(InMemoryTaskStore::new()), clock)
}
