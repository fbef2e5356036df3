pub mod search_handler;

pub use search_handler::{__path_search, search};
