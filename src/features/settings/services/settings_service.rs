use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::settings::dtos::{PublicSettingsDto, SettingResponseDto};
use crate::features::settings::models::Setting;
use crate::shared::constants::{
    PUBLIC_SETTING_KEYS, SETTING_LANDING_MARKDOWN, SETTING_LOGO, SETTING_LOGO_TYPE,
    SETTING_SITE_TITLE,
};
use crate::shared::types::{Icon, IconType};
use crate::shared::validation::SETTING_KEY_REGEX;

/// Service for site settings
pub struct SettingsService {
    pool: SqlitePool,
    default_site_title: String,
}

impl SettingsService {
    pub fn new(pool: SqlitePool, default_site_title: String) -> Self {
        Self {
            pool,
            default_site_title,
        }
    }

    pub async fn list(&self) -> Result<Vec<SettingResponseDto>> {
        let settings =
            sqlx::query_as::<_, Setting>("SELECT key, value, updated_at FROM settings ORDER BY key")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list settings: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(settings.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch setting {}: {:?}", key, e);
                AppError::Database(e)
            })
    }

    /// Markdown shown on the landing page, if configured
    pub async fn landing_markdown(&self) -> Result<Option<String>> {
        Ok(self
            .get(SETTING_LANDING_MARKDOWN)
            .await?
            .filter(|markdown| !markdown.trim().is_empty()))
    }

    pub async fn public(&self) -> Result<PublicSettingsDto> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT key, value FROM settings WHERE key IN (?, ?, ?)",
        )
        .bind(PUBLIC_SETTING_KEYS[0])
        .bind(PUBLIC_SETTING_KEYS[1])
        .bind(PUBLIC_SETTING_KEYS[2])
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load public settings: {:?}", e);
            AppError::Database(e)
        })?;

        let mut values: HashMap<String, String> = rows.into_iter().collect();

        let logo_type = match values.get(SETTING_LOGO_TYPE).map(String::as_str) {
            Some("image") => IconType::Image,
            _ => IconType::Fontawesome,
        };
        let logo = values
            .remove(SETTING_LOGO)
            .filter(|logo| !logo.trim().is_empty())
            .map(|logo| Icon::from_parts(logo_type, &logo));

        Ok(PublicSettingsDto {
            site_title: values
                .remove(SETTING_SITE_TITLE)
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| self.default_site_title.clone()),
            logo,
        })
    }

    /// Create or replace a setting
    pub async fn upsert(&self, key: &str, value: &str) -> Result<SettingResponseDto> {
        if !SETTING_KEY_REGEX.is_match(key) {
            return Err(AppError::Validation(format!(
                "Invalid setting key '{}': use lowercase letters, digits and underscores",
                key
            )));
        }
        if key == SETTING_LOGO_TYPE && !matches!(value, "fontawesome" | "image") {
            return Err(AppError::Validation(
                "logo_type must be 'fontawesome' or 'image'".to_string(),
            ));
        }

        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            RETURNING key, value, updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save setting {}: {:?}", key, e);
            AppError::Database(e)
        })?;

        tracing::info!("Setting saved: key={}", setting.key);

        Ok(setting.into())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete setting {}: {:?}", key, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Setting '{}' not found", key)));
        }

        tracing::info!("Setting deleted: key={}", key);
        Ok(())
    }
}
