mod search_result;

pub use search_result::{SearchQuery, SearchResult};
