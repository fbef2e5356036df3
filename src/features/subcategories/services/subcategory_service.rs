use sqlx::SqlitePool;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::navigation::models::FlatSubcategory;
use crate::features::navigation::tree::{flatten_with_indent, would_create_cycle};
use crate::features::subcategories::dtos::{SubcategoryRequestDto, SubcategoryResponseDto};
use crate::features::subcategories::models::Subcategory;
use crate::shared::constants::DEFAULT_SUBCATEGORY_ICON;
use crate::shared::validation::resolve_slug;

const SUBCATEGORY_COLUMNS: &str = "id, category_id, parent_subcategory_id, name, display_name, slug, icon, icon_type, order_index, is_hidden, created_at";
const SIBLING_ORDER: &str = "ORDER BY order_index ASC, name ASC, id ASC";
const DUPLICATE_SUBCATEGORY: &str = "A subcategory with this slug already exists in the category";

/// Service for subcategory operations
pub struct SubcategoryService {
    pool: SqlitePool,
}

impl SubcategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, filter: &str, bind: Option<i64>, context: &str) -> Result<Vec<Subcategory>> {
        let sql = format!(
            "SELECT {} FROM subcategories {} {}",
            SUBCATEGORY_COLUMNS, filter, SIBLING_ORDER
        );
        let mut query = sqlx::query_as::<_, Subcategory>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to list {}: {:?}", context, e);
            AppError::Database(e)
        })
    }

    /// Every subcategory of every category
    pub async fn fetch_all(&self) -> Result<Vec<Subcategory>> {
        self.fetch("", None, "subcategories").await
    }

    /// Every subcategory of one category, all nesting levels
    pub async fn fetch_by_category(&self, category_id: i64) -> Result<Vec<Subcategory>> {
        self.fetch(
            "WHERE category_id = ?",
            Some(category_id),
            "subcategories of category",
        )
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<SubcategoryResponseDto>> {
        let rows = self.fetch_all().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Top-level subcategories of a category
    pub async fn list_root_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<SubcategoryResponseDto>> {
        self.ensure_category_exists(category_id).await?;
        let rows = self
            .fetch(
                "WHERE category_id = ? AND parent_subcategory_id IS NULL",
                Some(category_id),
                "root subcategories",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Direct children of a subcategory
    pub async fn list_children(&self, parent_id: i64) -> Result<Vec<SubcategoryResponseDto>> {
        self.get_by_id(parent_id).await?;
        let rows = self
            .fetch(
                "WHERE parent_subcategory_id = ?",
                Some(parent_id),
                "child subcategories",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Indented pre-order listing of a category's subcategories, hidden included
    pub async fn list_flat(&self, category_id: i64) -> Result<Vec<FlatSubcategory>> {
        self.ensure_category_exists(category_id).await?;
        let rows = self.fetch_by_category(category_id).await?;
        Ok(flatten_with_indent(&rows)?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Subcategory> {
        sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {} FROM subcategories WHERE id = ?",
            SUBCATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch subcategory {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Subcategory with id {} not found", id)))
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check category {}: {:?}", category_id, e);
                AppError::Database(e)
            })?;

        if count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                category_id
            )));
        }
        Ok(())
    }

    /// The parent must exist and belong to the same category
    async fn ensure_valid_parent(&self, category_id: i64, parent_id: Option<i64>) -> Result<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };

        let parent = self.get_by_id(parent_id).await?;
        if parent.category_id != category_id {
            return Err(AppError::Validation(format!(
                "Parent subcategory {} belongs to a different category",
                parent_id
            )));
        }
        Ok(())
    }

    pub async fn create(&self, dto: SubcategoryRequestDto) -> Result<SubcategoryResponseDto> {
        self.ensure_category_exists(dto.category_id).await?;
        self.ensure_valid_parent(dto.category_id, dto.parent_subcategory_id)
            .await?;

        let slug = resolve_slug(dto.slug.as_deref(), &dto.display_name)
            .map_err(|e| AppError::Validation(format!("slug: {}", e)))?;

        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            r#"
            INSERT INTO subcategories
                (category_id, parent_subcategory_id, name, display_name, slug, icon, icon_type, order_index, is_hidden)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            SUBCATEGORY_COLUMNS
        ))
        .bind(dto.category_id)
        .bind(dto.parent_subcategory_id)
        .bind(&dto.name)
        .bind(&dto.display_name)
        .bind(&slug)
        .bind(dto.icon.as_deref().unwrap_or(DEFAULT_SUBCATEGORY_ICON))
        .bind(dto.icon_type.unwrap_or_default())
        .bind(dto.order_index.unwrap_or(0))
        .bind(dto.is_hidden.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_SUBCATEGORY))?;

        tracing::info!(
            "Subcategory created: id={}, category_id={}, slug={}",
            subcategory.id,
            subcategory.category_id,
            subcategory.slug
        );

        Ok(subcategory.into())
    }

    /// Update a subcategory, possibly moving it to another parent or category
    pub async fn update(&self, id: i64, dto: SubcategoryRequestDto) -> Result<SubcategoryResponseDto> {
        let current = self.get_by_id(id).await?;

        if dto.category_id != current.category_id {
            self.ensure_category_exists(dto.category_id).await?;
            let siblings = self.fetch_by_category(current.category_id).await?;
            if siblings
                .iter()
                .any(|s| s.parent_subcategory_id == Some(id))
            {
                return Err(AppError::Validation(
                    "Move or delete child subcategories before changing the category".to_string(),
                ));
            }
        }

        self.ensure_valid_parent(dto.category_id, dto.parent_subcategory_id)
            .await?;

        let rows = self.fetch_by_category(dto.category_id).await?;
        if would_create_cycle(&rows, id, dto.parent_subcategory_id) {
            return Err(AppError::Validation(
                "A subcategory cannot be moved below itself or its descendants".to_string(),
            ));
        }

        let slug = match dto.slug.as_deref() {
            Some(slug) => resolve_slug(Some(slug), &dto.display_name)
                .map_err(|e| AppError::Validation(format!("slug: {}", e)))?,
            None => current.slug,
        };

        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            r#"
            UPDATE subcategories
            SET category_id = ?, parent_subcategory_id = ?, name = ?, display_name = ?, slug = ?,
                icon = ?, icon_type = ?, order_index = ?, is_hidden = ?
            WHERE id = ?
            RETURNING {}
            "#,
            SUBCATEGORY_COLUMNS
        ))
        .bind(dto.category_id)
        .bind(dto.parent_subcategory_id)
        .bind(&dto.name)
        .bind(&dto.display_name)
        .bind(&slug)
        .bind(dto.icon.unwrap_or(current.icon))
        .bind(dto.icon_type.unwrap_or(current.icon_type))
        .bind(dto.order_index.unwrap_or(current.order_index))
        .bind(dto.is_hidden.unwrap_or(current.is_hidden))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_SUBCATEGORY))?
        .ok_or_else(|| AppError::NotFound(format!("Subcategory with id {} not found", id)))?;

        tracing::info!("Subcategory updated: id={}", subcategory.id);

        Ok(subcategory.into())
    }

    /// Delete a subcategory; nested subcategories and documents go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete subcategory {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Subcategory with id {} not found",
                id
            )));
        }

        tracing::info!("Subcategory deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use crate::shared::types::Icon;

    async fn category(pool: &SqlitePool, slug: &str) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO categories (name, display_name, slug) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(slug)
        .bind(slug)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn request(category_id: i64, parent: Option<i64>, name: &str) -> SubcategoryRequestDto {
        SubcategoryRequestDto {
            category_id,
            parent_subcategory_id: parent,
            name: name.to_string(),
            display_name: name.to_string(),
            slug: None,
            icon: None,
            icon_type: None,
            order_index: None,
            is_hidden: None,
        }
    }

    #[tokio::test]
    async fn test_create_nested_and_list_levels() {
        let pool = test_pool().await;
        let cat = category(&pool, "minecraft").await;
        let service = SubcategoryService::new(pool);

        let root = service.create(request(cat, None, "Setup")).await.unwrap();
        let child = service
            .create(request(cat, Some(root.id), "Plugins"))
            .await
            .unwrap();

        assert_eq!(root.slug, "setup");
        assert_eq!(root.icon, Icon::FontAwesome("fa-folder-open".to_string()));

        let roots = service.list_root_by_category(cat).await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, root.id);

        let children = service.list_children(root.id).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child.id);

        let flat = service.list_flat(cat).await.unwrap();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[1].indented_name, "  Plugins");
    }

    #[tokio::test]
    async fn test_parent_in_other_category_is_rejected() {
        let pool = test_pool().await;
        let first = category(&pool, "first").await;
        let second = category(&pool, "second").await;
        let service = SubcategoryService::new(pool);

        let parent = service.create(request(first, None, "Parent")).await.unwrap();
        let err = service
            .create(request(second, Some(parent.id), "Child"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let service = SubcategoryService::new(test_pool().await);
        let err = service.create(request(99, None, "Orphan")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_slug_unique_per_category_only() {
        let pool = test_pool().await;
        let first = category(&pool, "first").await;
        let second = category(&pool, "second").await;
        let service = SubcategoryService::new(pool);

        service.create(request(first, None, "Setup")).await.unwrap();
        service.create(request(second, None, "Setup")).await.unwrap();

        let err = service
            .create(request(first, None, "Setup"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_cycles() {
        let pool = test_pool().await;
        let cat = category(&pool, "cat").await;
        let service = SubcategoryService::new(pool);

        let a = service.create(request(cat, None, "A")).await.unwrap();
        let b = service.create(request(cat, Some(a.id), "B")).await.unwrap();

        let err = service
            .update(a.id, request(cat, Some(b.id), "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .update(a.id, request(cat, Some(a.id), "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Moving the child up to the top level is fine
        let moved = service.update(b.id, request(cat, None, "B")).await.unwrap();
        assert_eq!(moved.parent_subcategory_id, None);
    }

    #[tokio::test]
    async fn test_category_change_requires_leaf() {
        let pool = test_pool().await;
        let first = category(&pool, "first").await;
        let second = category(&pool, "second").await;
        let service = SubcategoryService::new(pool);

        let a = service.create(request(first, None, "A")).await.unwrap();
        let b = service.create(request(first, Some(a.id), "B")).await.unwrap();

        let err = service
            .update(a.id, request(second, None, "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let moved = service.update(b.id, request(second, None, "B")).await.unwrap();
        assert_eq!(moved.category_id, second);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_children() {
        let pool = test_pool().await;
        let cat = category(&pool, "cat").await;
        let service = SubcategoryService::new(pool);

        let a = service.create(request(cat, None, "A")).await.unwrap();
        let b = service.create(request(cat, Some(a.id), "B")).await.unwrap();

        service.delete(a.id).await.unwrap();

        assert!(matches!(
            service.get_by_id(b.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(a.id).await, Err(AppError::NotFound(_))));
    }
}
