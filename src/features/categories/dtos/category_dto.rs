use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::types::{Icon, IconType};
use crate::shared::validation::SLUG_REGEX;

/// Request DTO for creating or updating a category
///
/// Omitted optional fields fall back to their defaults; a missing slug is
/// derived from the display name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequestDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Display name must be 1-200 characters"))]
    pub display_name: String,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Icon must be 1-500 characters"))]
    pub icon: Option<String>,

    pub icon_type: Option<IconType>,

    pub order_index: Option<i64>,

    pub is_hidden: Option<bool>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub icon: Icon,
    pub order_index: i64,
    pub is_hidden: bool,
    pub created_at: NaiveDateTime,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            icon: c.icon(),
            id: c.id,
            name: c.name,
            display_name: c.display_name,
            slug: c.slug,
            order_index: c.order_index,
            is_hidden: c.is_hidden,
            created_at: c.created_at,
        }
    }
}
