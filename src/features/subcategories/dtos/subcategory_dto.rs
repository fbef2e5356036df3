use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::subcategories::models::Subcategory;
use crate::shared::types::{Icon, IconType};
use crate::shared::validation::SLUG_REGEX;

/// Request DTO for creating or updating a subcategory
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubcategoryRequestDto {
    pub category_id: i64,

    /// Parent subcategory in the same category; `null` for the top level
    pub parent_subcategory_id: Option<i64>,

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

/// Response DTO for subcategory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubcategoryResponseDto {
    pub id: i64,
    pub category_id: i64,
    pub parent_subcategory_id: Option<i64>,
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub icon: Icon,
    pub order_index: i64,
    pub is_hidden: bool,
    pub created_at: NaiveDateTime,
}

impl From<Subcategory> for SubcategoryResponseDto {
    fn from(s: Subcategory) -> Self {
        Self {
            icon: s.icon(),
            id: s.id,
            category_id: s.category_id,
            parent_subcategory_id: s.parent_subcategory_id,
            name: s.name,
            display_name: s.display_name,
            slug: s.slug,
            order_index: s.order_index,
            is_hidden: s.is_hidden,
            created_at: s.created_at,
        }
    }
}
