//! pmax-mock - In-memory mock Unisphere server.
//!
//! Emulates the Unisphere REST surface over real HTTP so client code can
//! be integration-tested without a physical array. Each [`MockArray`] is
//! an isolated in-memory store constructed per test run; nothing is
//! global, so parallel tests do not interfere.
//!
//! # Example
//!
//! ```no_run
//! use pmax_mock::MockUnisphere;
//!
//! # async fn example() {
//! let mock = MockUnisphere::start().await;
//! mock.array().add_volume("00001", "test-vol", 547, &[]);
//! println!("Unisphere at {}", mock.url());
//! # }
//! ```

mod error;
mod handlers;
mod server;
mod store;

pub use server::MockUnisphere;
pub use store::{
    ArrayData, DEFAULT_SRP_ID, DEFAULT_SYM_ID, ITERATOR_PAGE_SIZE, InducedErrors, MockArray,
    MockJob,
};
