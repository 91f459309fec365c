//! # Scheduler Core Library
//!
//! Task storage and the recurrence engine behind the scheduler service.
//!
//! ## Core Modules
//!
//! - [`recurrence`]: Repeat rule parsing and next-date calculation
//! - [`dates`]: `YYYYMMDD` parsing, formatting and calendar helpers
//! - [`timezone`]: IANA timezone validation and "today" lookup
//! - [`models`]: Task records, client input and list filters
//! - [`db`]: Database connection and migration management
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types for the engine and storage
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use scheduler_core::recurrence::next_date;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! assert_eq!(next_date(today, "20240101", "d 7").unwrap(), "20240318");
//! assert!(next_date(today, "20240101", "d 401").is_err());
//! ```
//!
//! ```rust,no_run
//! use scheduler_core::{db, models::TaskInput, repository::{SqliteRepository, TaskRepository}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let today = chrono::Utc::now().date_naive();
//!     let input = TaskInput {
//!         title: "Water the plants".to_string(),
//!         repeat: "w 1,4".to_string(),
//!         ..Default::default()
//!     };
//!     let task = repo.add_task(input.normalize(today)?).await?;
//!     println!("Created task {} for {}", task.id, task.date);
//!
//!     Ok(())
//! }
//! ```

pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod timezone;
