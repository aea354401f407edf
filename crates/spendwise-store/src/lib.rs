//! Spendwise Store
//!
//! Persistence for expense records. The HTTP layer talks to an
//! [`ExpenseStore`]; two backends are provided:
//! - [`MemoryStore`] keeps records in process memory
//! - [`JsonlStore`] appends records to a JSON-lines file and replays it on open

pub mod jsonl;
pub mod memory;
pub mod store;

pub use jsonl::{JsonlStore, LogSink};
pub use memory::MemoryStore;
pub use store::{sort_newest_first, ExpenseStore, SharedStore};
