//! Online/offline session model

pub mod offline;
pub mod profile;

pub use offline::SessionTransition;
pub use profile::{DurationFormula, SessionProfile};
