use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::shared::types::{Icon, IconType};

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub icon: String,
    pub icon_type: IconType,
    pub order_index: i64,
    pub is_hidden: bool,
    pub created_at: NaiveDateTime,
}

impl Category {
    pub fn icon(&self) -> Icon {
        Icon::from_parts(self.icon_type, &self.icon)
    }
}
