pub mod error;
pub mod filter;
pub mod matches;
