use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::Icon;

/// Top-level entry of the navigation structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub icon: Icon,
    pub is_hidden: bool,
    pub order_index: i64,
    pub subcategories: Vec<SubcategoryNode>,
}

/// Subcategory with its ordered children and guides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct SubcategoryNode {
    pub id: i64,
    pub category_id: i64,
    pub parent_subcategory_id: Option<i64>,
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub icon: Icon,
    pub is_hidden: bool,
    pub order_index: i64,
    pub subcategories: Vec<SubcategoryNode>,
    pub guides: Vec<GuideNode>,
}

/// A document as it appears in the navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GuideNode {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// `<category>/<subcategory>/<document>` slug path
    pub path: String,
    pub url: String,
    pub is_published: bool,
}

/// Subcategory row annotated with its depth, for selection lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FlatSubcategory {
    pub id: i64,
    pub category_id: i64,
    pub parent_subcategory_id: Option<i64>,
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub icon: Icon,
    pub is_hidden: bool,
    pub order_index: i64,
    pub level: usize,
    /// Display name prefixed with two spaces per level
    pub indented_name: String,
}
