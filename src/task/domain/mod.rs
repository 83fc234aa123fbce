//! Domain model for the task board.
//!
//! Tasks carry a title, a description, and a two-state status. The domain
//! knows nothing about storage; identifiers are handed out by whichever
//! repository persists the task.

mod error;
mod ids;
mod task;

pub use error::ParseTaskStatusError;
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskStatus};
