use std::sync::Arc;

use crate::features::navigation::dtos::LandingResponseDto;
use crate::features::navigation::services::{first_guide_path, StructureLoader};
use crate::features::settings::SettingsService;
use crate::shared::constants::{DEFAULT_LANDING_MARKDOWN, DOCS_URL_PREFIX};
use crate::shared::markdown::render_html;

/// Decides what readers see at the site root
pub struct LandingService {
    loader: Arc<StructureLoader>,
    settings: Arc<SettingsService>,
}

impl LandingService {
    pub fn new(loader: Arc<StructureLoader>, settings: Arc<SettingsService>) -> Self {
        Self { loader, settings }
    }

    /// Redirect to the first guide, or render the landing Markdown when
    /// nothing is published yet
    pub async fn landing(&self) -> LandingResponseDto {
        let structure = self.loader.load().await;
        if let Some(path) = first_guide_path(&structure) {
            return LandingResponseDto {
                redirect: Some(format!("{}/{}", DOCS_URL_PREFIX, path)),
                html: None,
            };
        }

        let markdown = match self.settings.landing_markdown().await {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::error!("Failed to load landing markdown: {}", e);
                None
            }
        };

        LandingResponseDto {
            redirect: None,
            html: Some(render_html(
                markdown.as_deref().unwrap_or(DEFAULT_LANDING_MARKDOWN),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::CategoryService;
    use crate::features::documents::DocumentService;
    use crate::features::navigation::HiddenPolicy;
    use crate::features::subcategories::SubcategoryService;
    use crate::shared::test_helpers::test_pool;
    use sqlx::SqlitePool;

    fn service(pool: SqlitePool) -> LandingService {
        let loader = StructureLoader::new(
            Arc::new(CategoryService::new(pool.clone())),
            Arc::new(SubcategoryService::new(pool.clone())),
            Arc::new(DocumentService::new(pool.clone())),
            HiddenPolicy::Prune,
        );
        LandingService::new(
            Arc::new(loader),
            Arc::new(SettingsService::new(pool, "Docs".to_string())),
        )
    }

    #[tokio::test]
    async fn test_empty_site_renders_default_landing() {
        let landing = service(test_pool().await).landing().await;

        assert_eq!(landing.redirect, None);
        assert!(landing.html.unwrap().contains("<h1>Welcome</h1>"));
    }

    #[tokio::test]
    async fn test_custom_landing_markdown() {
        let pool = test_pool().await;
        let settings = SettingsService::new(pool.clone(), "Docs".to_string());
        settings
            .upsert("landing_markdown", "# Hello readers")
            .await
            .unwrap();

        let landing = service(pool).landing().await;

        assert!(landing.html.unwrap().contains("<h1>Hello readers</h1>"));
    }

    #[tokio::test]
    async fn test_redirects_to_first_guide() {
        let pool = test_pool().await;
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, display_name, slug) VALUES (1, 'mc', 'Minecraft', 'minecraft');
            INSERT INTO subcategories (id, category_id, name, display_name, slug) VALUES (1, 1, 'setup', 'Setup', 'setup');
            INSERT INTO documents (subcategory_id, title, slug, content) VALUES (1, 'Install', 'install', 'x');
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let landing = service(pool).landing().await;

        assert_eq!(
            landing.redirect.as_deref(),
            Some("/docs/minecraft/setup/install")
        );
        assert_eq!(landing.html, None);
    }
}
