//! Repeatable "additional enrollment" rows.
//!
//! A row is a `<div>` inside the enrollment container holding a user text
//! field, a role `<select>` and a Delete control. Field names follow the
//! indexed convention `additional_enrollments[n][user]` so the submitted
//! form decodes back into an ordered list (see [`crate::form_data`]).
//!
//! # Examples
//!
//! ```
//! use enrollrows::config::EnrollmentConfig;
//! use enrollrows::dom::Document;
//! use enrollrows::enrollment::{row_ids, AlertLog, EnrollmentRows};
//!
//! let config = EnrollmentConfig::default();
//! let doc = Document::with_container(&config.container_id);
//! let mut rows = EnrollmentRows::new(doc, config, AlertLog::new());
//!
//! rows.add().unwrap();
//! rows.add().unwrap();
//! rows.remove_row("addEnroll-1").unwrap();
//! assert!(rows.remove_row("addEnroll-1").is_err());
//!
//! assert_eq!(row_ids(rows.dom(), rows.config()), vec!["addEnroll-2"]);
//! assert_eq!(
//!     rows.notifier().messages(),
//!     ["Child div has already been removed or does not exist."]
//! );
//! ```

mod adder;
mod error;
mod notify;
mod remover;
mod replay;
mod rows;
mod snapshot;

pub use adder::{add_row, build_row, next_sequence, AddedRow, CONTAINER_ATTR, ROW_ATTR};
pub use error::EnrollmentError;
pub use notify::{AlertLog, Notifier};
pub use remover::{activate_delete, remove_row, RemovedRow};
pub use replay::{replay, ParseReplayOpError, ReplayOp, ReplayStep};
pub use rows::EnrollmentRows;
pub use snapshot::{container_html, delete_control, row_ids, row_views};
