//! Dashboard filter state, owned by whatever renders the food list.
//!
//! ```text
//! FilterForm --submit--> FilterStore <--settled term-- SearchDebouncer
//!                            |
//!                      begin_query() -> QueryTicket -> get_foods
//!                            |
//!                      complete(ticket) drops pages for stale generations
//! ```

pub mod debounce;
pub mod form;
pub mod session;
pub mod store;

pub use debounce::SearchDebouncer;
pub use form::FilterForm;
pub use session::{DashboardSession, QueryTicket};
pub use store::FilterStore;
