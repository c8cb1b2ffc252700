//! Value Objects - Immutable, identity-less domain primitives

mod gender;
mod language_id;
mod run_id;
mod run_status;
mod task_id;
mod task_kind;

pub use gender::Gender;
pub use language_id::LanguageId;
pub use run_id::RunId;
pub use run_status::RunStatus;
pub use task_id::TaskId;
pub use task_kind::TaskKind;
