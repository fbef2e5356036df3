use sqlx::SqlitePool;

use crate::core::database::map_db_error;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::Category;
use crate::shared::constants::DEFAULT_CATEGORY_ICON;
use crate::shared::validation::resolve_slug;

const CATEGORY_COLUMNS: &str =
    "id, name, display_name, slug, icon, icon_type, order_index, is_hidden, created_at";
const DUPLICATE_CATEGORY: &str = "A category with this name or slug already exists";

/// Service for category operations
pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch every category row, hidden ones included, in display order
    pub async fn fetch_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY order_index ASC, name ASC, id ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.fetch_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = ?",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch category {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let slug = resolve_slug(dto.slug.as_deref(), &dto.display_name)
            .map_err(|e| AppError::Validation(format!("slug: {}", e)))?;

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, display_name, slug, icon, icon_type, order_index, is_hidden)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.display_name)
        .bind(&slug)
        .bind(dto.icon.as_deref().unwrap_or(DEFAULT_CATEGORY_ICON))
        .bind(dto.icon_type.unwrap_or_default())
        .bind(dto.order_index.unwrap_or(0))
        .bind(dto.is_hidden.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, DUPLICATE_CATEGORY))?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);

        Ok(category.into())
    }

    pub async fn update(&self, id: i64, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let current = self.get_by_id(id).await?;
        let slug = match dto.slug.as_deref() {
            Some(slug) => resolve_slug(Some(slug), &dto.display_name)
                .map_err(|e| AppError::Validation(format!("slug: {}", e)))?,
            None => current.slug,
        };

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = ?, display_name = ?, slug = ?, icon = ?, icon_type = ?, order_index = ?, is_hidden = ?
            WHERE id = ?
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
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
        .map_err(|e| map_db_error(e, DUPLICATE_CATEGORY))?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Delete a category; subcategories and documents go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use crate::shared::types::{Icon, IconType};

    fn request(name: &str) -> CategoryRequestDto {
        CategoryRequestDto {
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
    async fn test_create_applies_defaults_and_derives_slug() {
        let service = CategoryService::new(test_pool().await);

        let created = service.create(request("Game Servers")).await.unwrap();

        assert_eq!(created.slug, "game-servers");
        assert_eq!(created.icon, Icon::FontAwesome("fa-folder".to_string()));
        assert_eq!(created.order_index, 0);
        assert!(!created.is_hidden);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_order_index_then_name() {
        let service = CategoryService::new(test_pool().await);
        let mut late = request("Alpha");
        late.order_index = Some(5);
        service.create(late).await.unwrap();
        service.create(request("Zulu")).await.unwrap();
        service.create(request("Bravo")).await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Bravo", "Zulu", "Alpha"]);
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let service = CategoryService::new(test_pool().await);
        service.create(request("Guides")).await.unwrap();

        let mut dup = request("Other");
        dup.slug = Some("guides".to_string());
        let err = service.create(dup).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let service = CategoryService::new(test_pool().await);
        let mut dto = request("Guides");
        dto.icon = Some("/img/guides.png".to_string());
        dto.icon_type = Some(IconType::Image);
        let created = service.create(dto).await.unwrap();

        let mut update = request("Guides");
        update.display_name = "User Guides".to_string();
        update.is_hidden = Some(true);
        let updated = service.update(created.id, update).await.unwrap();

        assert_eq!(updated.slug, "guides");
        assert_eq!(updated.display_name, "User Guides");
        assert_eq!(updated.icon, Icon::Image("/img/guides.png".to_string()));
        assert!(updated.is_hidden);
    }

    #[tokio::test]
    async fn test_delete_missing_category() {
        let service = CategoryService::new(test_pool().await);
        assert!(matches!(
            service.delete(42).await,
            Err(AppError::NotFound(_))
        ));
    }
}
