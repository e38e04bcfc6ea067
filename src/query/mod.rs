//! Fetch lifecycle keyed by query string.
//!
//! [`QueryCoordinator`] tracks which key is current, which fetches are in
//! flight and what each settled to. It is I/O free; the UI layer runs the
//! fetches it asks for.

mod coordinator;
mod key;

pub use coordinator::{FetchStatus, FetchTicket, QueryCoordinator, QuerySnapshot, Settled};
pub use key::QueryKey;
