//! iCalendar feed generation.

pub mod generate;

pub use generate::{generate_feed, FeedOptions};
