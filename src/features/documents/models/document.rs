use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for document
#[derive(Debug, Clone, FromRow)]
pub struct Document {
    pub id: i64,
    pub subcategory_id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: String,
    pub order_index: i64,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Document row without its Markdown body, used for navigation
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DocumentSummary {
    pub id: i64,
    pub subcategory_id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order_index: i64,
    pub is_published: bool,
}

/// Published document joined with its category and subcategory
#[derive(Debug, Clone, FromRow)]
pub struct SearchCandidate {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_name: String,
    pub category_slug: String,
    pub subcategory_name: String,
    pub subcategory_slug: String,
}

/// Admin listing row: document joined with its subcategory and category
#[derive(Debug, Clone, FromRow)]
pub struct DocumentListing {
    pub id: i64,
    pub subcategory_id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order_index: i64,
    pub is_published: bool,
    pub updated_at: NaiveDateTime,
    pub subcategory_name: String,
    pub subcategory_slug: String,
    pub category_id: i64,
    pub category_name: String,
    pub category_slug: String,
}

/// Published document resolved by its slug path
#[derive(Debug, Clone, FromRow)]
pub struct PublishedDocument {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: String,
    pub updated_at: NaiveDateTime,
    pub subcategory_name: String,
    pub subcategory_slug: String,
    pub category_name: String,
    pub category_slug: String,
}
