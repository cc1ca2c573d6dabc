//! Terminal presentation helpers

mod cli;

pub use cli::{print_entries, print_error, print_served};
