use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::settings::models::Setting;
use crate::shared::types::Icon;

/// Request DTO for setting a value
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingDto {
    #[validate(length(max = 100000, message = "Value must be at most 100000 characters"))]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettingResponseDto {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

impl From<Setting> for SettingResponseDto {
    fn from(s: Setting) -> Self {
        Self {
            key: s.key,
            value: s.value,
            updated_at: s.updated_at,
        }
    }
}

/// Settings visible without authentication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicSettingsDto {
    pub site_title: String,
    pub logo: Option<Icon>,
}
