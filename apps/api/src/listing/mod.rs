// Job listing: in-memory postings, search/location/recency filters,
// and the simulated refresh that reorders the list.

pub mod age;
pub mod board;
pub mod filter;
pub mod handlers;
pub mod seed;

pub use board::JobBoard;
