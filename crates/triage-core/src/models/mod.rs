//! Domain models for the triage engine.

mod assessment;
mod condition;
mod prediction;
mod symptom;
mod triage;

pub use assessment::*;
pub use condition::*;
pub use prediction::*;
pub use symptom::*;
pub use triage::*;
