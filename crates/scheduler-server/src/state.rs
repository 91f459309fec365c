use chrono::NaiveDate;
use chrono_tz::Tz;
use scheduler_core::repository::SqliteRepository;
use scheduler_core::timezone::today_in;

/// Source of "today" for the handlers.
#[derive(Debug, Clone)]
pub enum Clock {
    /// The current day in the given timezone.
    System(Tz),
    /// A pinned day, for tests and reproducible runs.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System(tz) => today_in(tz),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Shared state handed to every handler through `Arc`.
pub struct AppState {
    pub repo: SqliteRepository,
    pub clock: Clock,
    pub task_list_limit: u32,
}

impl AppState {
    pub fn new(repo: SqliteRepository, clock: Clock, task_list_limit: u32) -> Self {
        Self {
            repo,
            clock,
            task_list_limit,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
