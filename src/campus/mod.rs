pub mod dataset;
pub mod grid;
pub mod intent;
pub mod store;

pub use dataset::{Dataset, DaySchedule, Institution, Section};
pub use grid::{Grid, GridRow, PLACEHOLDER};
pub use intent::{Intent, IntentMatcher, Payload, Reply};
pub use store::{AddStudentError, RosterStore};
