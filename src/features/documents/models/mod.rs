mod document;

pub use document::{Document, DocumentListing, DocumentSummary, PublishedDocument, SearchCandidate};
