use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::documents::models::{
    Document, DocumentListing, DocumentSummary, PublishedDocument,
};
use crate::shared::constants::DOCS_URL_PREFIX;
use crate::shared::markdown::render_html;
use crate::shared::validation::SLUG_REGEX;

/// Request DTO for creating a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentDto {
    pub subcategory_id: i64,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Derived from the title when omitted
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    /// Markdown body
    pub content: String,

    pub order_index: Option<i64>,

    /// Defaults to `true`
    pub is_published: Option<bool>,
}

/// Request DTO for updating a document
///
/// Setting `subcategory_id` moves the document to another subcategory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentDto {
    pub subcategory_id: Option<i64>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub content: String,

    pub order_index: Option<i64>,

    pub is_published: Option<bool>,
}

/// Request DTO for replacing only the Markdown body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuickEditDto {
    pub content: String,
}

/// Query params for listing documents
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDocumentsQuery {
    /// Only documents of this subcategory
    pub subcategory_id: Option<i64>,
}

/// Response DTO for document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponseDto {
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

impl From<Document> for DocumentResponseDto {
    fn from(d: Document) -> Self {
        Self {
            id: d.id,
            subcategory_id: d.subcategory_id,
            title: d.title,
            slug: d.slug,
            description: d.description,
            content: d.content,
            order_index: d.order_index,
            is_published: d.is_published,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Document entry without its Markdown body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentSummaryDto {
    pub id: i64,
    pub subcategory_id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order_index: i64,
    pub is_published: bool,
}

impl From<DocumentSummary> for DocumentSummaryDto {
    fn from(d: DocumentSummary) -> Self {
        Self {
            id: d.id,
            subcategory_id: d.subcategory_id,
            title: d.title,
            slug: d.slug,
            description: d.description,
            order_index: d.order_index,
            is_published: d.is_published,
        }
    }
}

/// Admin list entry with its location in the tree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentListItemDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order_index: i64,
    pub is_published: bool,
    pub updated_at: NaiveDateTime,
    pub subcategory_id: i64,
    pub subcategory_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub path: String,
}

impl From<DocumentListing> for DocumentListItemDto {
    fn from(d: DocumentListing) -> Self {
        Self {
            path: format!("{}/{}/{}", d.category_slug, d.subcategory_slug, d.slug),
            id: d.id,
            title: d.title,
            slug: d.slug,
            description: d.description,
            order_index: d.order_index,
            is_published: d.is_published,
            updated_at: d.updated_at,
            subcategory_id: d.subcategory_id,
            subcategory_name: d.subcategory_name,
            category_id: d.category_id,
            category_name: d.category_name,
        }
    }
}

/// Raw Markdown of a document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentContentDto {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Published document as served to readers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicDocumentDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: String,
    /// `content` rendered from Markdown
    pub html: String,
    pub path: String,
    pub url: String,
    pub category_name: String,
    pub category_slug: String,
    pub subcategory_name: String,
    pub subcategory_slug: String,
    pub updated_at: NaiveDateTime,
}

impl From<PublishedDocument> for PublicDocumentDto {
    fn from(d: PublishedDocument) -> Self {
        let path = format!("{}/{}/{}", d.category_slug, d.subcategory_slug, d.slug);
        Self {
            html: render_html(&d.content),
            url: format!("{}/{}", DOCS_URL_PREFIX, path),
            path,
            id: d.id,
            title: d.title,
            slug: d.slug,
            description: d.description,
            content: d.content,
            category_name: d.category_name,
            category_slug: d.category_slug,
            subcategory_name: d.subcategory_name,
            subcategory_slug: d.subcategory_slug,
            updated_at: d.updated_at,
        }
    }
}
