use sqlx::SqlitePool;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::documents::dtos::{
    CreateDocumentDto, DocumentContentDto, DocumentListItemDto, DocumentResponseDto,
    PublicDocumentDto, UpdateDocumentDto,
};
use crate::features::documents::models::{
    Document, DocumentListing, DocumentSummary, PublishedDocument, SearchCandidate,
};
use crate::shared::validation::resolve_slug;

const DOCUMENT_COLUMNS: &str = "id, subcategory_id, title, slug, description, content, order_index, is_published, created_at, updated_at";
const DOCUMENT_ORDER: &str = "order_index ASC, title ASC, id ASC";
const DUPLICATE_DOCUMENT: &str = "A document with this slug already exists in the subcategory";

/// Service for document operations
pub struct DocumentService {
    pool: SqlitePool,
}

impl DocumentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Documents without their bodies, grouped per subcategory by the caller
    pub async fn fetch_summaries(&self, published_only: bool) -> Result<Vec<DocumentSummary>> {
        let filter = if published_only {
            "WHERE is_published = 1"
        } else {
            ""
        };

        sqlx::query_as::<_, DocumentSummary>(&format!(
            r#"
            SELECT id, subcategory_id, title, slug, description, order_index, is_published
            FROM documents
            {}
            ORDER BY subcategory_id ASC, {}
            "#,
            filter, DOCUMENT_ORDER
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list document summaries: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Documents of one subcategory in display order
    pub async fn fetch_by_subcategory(
        &self,
        subcategory_id: i64,
        published_only: bool,
    ) -> Result<Vec<DocumentSummary>> {
        let filter = if published_only {
            "AND is_published = 1"
        } else {
            ""
        };

        sqlx::query_as::<_, DocumentSummary>(&format!(
            r#"
            SELECT id, subcategory_id, title, slug, description, order_index, is_published
            FROM documents
            WHERE subcategory_id = ? {}
            ORDER BY {}
            "#,
            filter, DOCUMENT_ORDER
        ))
        .bind(subcategory_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to list documents of subcategory {}: {:?}",
                subcategory_id,
                e
            );
            AppError::Database(e)
        })
    }

    /// Admin listing, optionally restricted to one subcategory
    pub async fn list(&self, subcategory_id: Option<i64>) -> Result<Vec<DocumentListItemDto>> {
        let filter = if subcategory_id.is_some() {
            "WHERE d.subcategory_id = ?"
        } else {
            ""
        };

        let sql = format!(
            r#"
            SELECT d.id, d.subcategory_id, d.title, d.slug, d.description, d.order_index,
                   d.is_published, d.updated_at,
                   s.display_name AS subcategory_name, s.slug AS subcategory_slug,
                   c.id AS category_id, c.display_name AS category_name, c.slug AS category_slug
            FROM documents d
            JOIN subcategories s ON s.id = d.subcategory_id
            JOIN categories c ON c.id = s.category_id
            {}
            ORDER BY c.order_index ASC, c.name ASC, s.order_index ASC, s.name ASC,
                     d.order_index ASC, d.title ASC, d.id ASC
            "#,
            filter
        );

        let mut query = sqlx::query_as::<_, DocumentListing>(&sql);
        if let Some(id) = subcategory_id {
            query = query.bind(id);
        }

        let documents = query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to list documents: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Document> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE id = ?",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch document {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Document with id {} not found", id)))
    }

    /// Raw Markdown for in-place editing
    pub async fn get_content(&self, id: i64) -> Result<DocumentContentDto> {
        let document = self.get_by_id(id).await?;
        Ok(DocumentContentDto {
            id: document.id,
            title: document.title,
            content: document.content,
        })
    }

    /// Resolve a published document by its category, subcategory and document slugs
    pub async fn get_published_by_slugs(
        &self,
        category_slug: &str,
        subcategory_slug: &str,
        document_slug: &str,
    ) -> Result<PublicDocumentDto> {
        let document = sqlx::query_as::<_, PublishedDocument>(
            r#"
            SELECT d.id, d.title, d.slug, d.description, d.content, d.updated_at,
                   s.display_name AS subcategory_name, s.slug AS subcategory_slug,
                   c.display_name AS category_name, c.slug AS category_slug
            FROM documents d
            JOIN subcategories s ON s.id = d.subcategory_id
            JOIN categories c ON c.id = s.category_id
            WHERE c.slug = ? AND s.slug = ? AND d.slug = ? AND d.is_published = 1
            "#,
        )
        .bind(category_slug)
        .bind(subcategory_slug)
        .bind(document_slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch published document: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Document '{}/{}/{}' not found",
                category_slug, subcategory_slug, document_slug
            ))
        })?;

        Ok(document.into())
    }

    /// Published documents joined with category and subcategory names
    pub async fn search_candidates(&self) -> Result<Vec<SearchCandidate>> {
        sqlx::query_as::<_, SearchCandidate>(
            r#"
            SELECT d.title, d.slug, d.description,
                   c.display_name AS category_name, c.slug AS category_slug,
                   s.display_name AS subcategory_name, s.slug AS subcategory_slug
            FROM documents d
            JOIN subcategories s ON s.id = d.subcategory_id
            JOIN categories c ON c.id = s.category_id
            WHERE d.is_published = 1
            ORDER BY d.title ASC, d.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load search candidates: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn ensure_subcategory_exists(&self, subcategory_id: i64) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subcategories WHERE id = ?")
            .bind(subcategory_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check subcategory {}: {:?}", subcategory_id, e);
                AppError::Database(e)
            })?;

        if count == 0 {
            return Err(AppError::NotFound(format!(
                "Subcategory with id {} not found",
                subcategory_id
            )));
        }
        Ok(())
    }

    pub async fn create(&self, dto: CreateDocumentDto) -> Result<DocumentResponseDto> {
        self.ensure_subcategory_exists(dto.subcategory_id).await?;

        let slug = resolve_slug(dto.slug.as_deref(), &dto.title)
            .map_err(|e| AppError::Validation(format!("slug: {}", e)))?;

        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            INSERT INTO documents (subcategory_id, title, slug, description, content, order_index, is_published)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(dto.subcategory_id)
        .bind(&dto.title)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&dto.content)
        .bind(dto.order_index.unwrap_or(0))
        .bind(dto.is_published.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_DOCUMENT))?;

        tracing::info!(
            "Document created: id={}, subcategory_id={}, slug={}",
            document.id,
            document.subcategory_id,
            document.slug
        );

        Ok(document.into())
    }

    /// Update a document; `updated_at` is refreshed
    pub async fn update(&self, id: i64, dto: UpdateDocumentDto) -> Result<DocumentResponseDto> {
        let current = self.get_by_id(id).await?;

        let subcategory_id = match dto.subcategory_id {
            Some(target) if target != current.subcategory_id => {
                self.ensure_subcategory_exists(target).await?;
                tracing::info!(
                    "Moving document {} from subcategory {} to {}",
                    id,
                    current.subcategory_id,
                    target
                );
                target
            }
            _ => current.subcategory_id,
        };

        let slug = match dto.slug.as_deref() {
            Some(slug) => resolve_slug(Some(slug), &dto.title)
                .map_err(|e| AppError::Validation(format!("slug: {}", e)))?,
            None => current.slug,
        };

        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            UPDATE documents
            SET subcategory_id = ?, title = ?, slug = ?, description = ?, content = ?,
                order_index = ?, is_published = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(subcategory_id)
        .bind(&dto.title)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&dto.content)
        .bind(dto.order_index.unwrap_or(current.order_index))
        .bind(dto.is_published.unwrap_or(current.is_published))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_DOCUMENT))?
        .ok_or_else(|| AppError::NotFound(format!("Document with id {} not found", id)))?;

        tracing::info!("Document updated: id={}", document.id);

        Ok(document.into())
    }

    /// Replace only the Markdown body
    pub async fn update_content(&self, id: i64, content: &str) -> Result<DocumentResponseDto> {
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            UPDATE documents
            SET content = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update content of document {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Document with id {} not found", id)))?;

        tracing::info!("Document content updated: id={}", document.id);

        Ok(document.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete document {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Document with id {} not found",
                id
            )));
        }

        tracing::info!("Document deleted: id={}", id);
        Ok(())
    }
}
