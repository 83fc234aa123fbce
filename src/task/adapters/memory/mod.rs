//! In-memory adapters for the task board.

mod task;

pub use task::InMemoryTaskRepository;
