use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::documents::{dtos as documents_dtos, handlers as documents_handlers};
use crate::features::navigation::{
    dtos as navigation_dtos, handlers as navigation_handlers, models as navigation_models,
};
use crate::features::search::{handlers as search_handlers, models as search_models};
use crate::features::settings::{dtos as settings_dtos, handlers as settings_handlers};
use crate::features::subcategories::{
    dtos as subcategories_dtos, handlers as subcategories_handlers,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Icon, IconType, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Navigation (public)
        navigation_handlers::get_navigation,
        navigation_handlers::get_landing,
        // Documents (public)
        documents_handlers::get_published_document,
        // Search (public)
        search_handlers::search,
        // Settings (public)
        settings_handlers::get_public_settings,
        // Users (admin)
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Categories (admin)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Subcategories (admin)
        subcategories_handlers::list_subcategories,
        subcategories_handlers::list_root_by_category,
        subcategories_handlers::list_flat_by_category,
        subcategories_handlers::list_children,
        subcategories_handlers::get_subcategory,
        subcategories_handlers::create_subcategory,
        subcategories_handlers::update_subcategory,
        subcategories_handlers::delete_subcategory,
        // Documents (admin)
        documents_handlers::list_documents,
        documents_handlers::list_subcategory_documents,
        documents_handlers::get_document,
        documents_handlers::get_document_content,
        documents_handlers::create_document,
        documents_handlers::update_document,
        documents_handlers::quick_edit_document,
        documents_handlers::delete_document,
        // Settings (admin)
        settings_handlers::list_settings,
        settings_handlers::update_setting,
        settings_handlers::delete_setting,
        // Structure (admin)
        navigation_handlers::get_admin_structure,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Icon,
            IconType,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Navigation
            navigation_models::CategoryNode,
            navigation_models::SubcategoryNode,
            navigation_models::GuideNode,
            navigation_models::FlatSubcategory,
            navigation_dtos::LandingResponseDto,
            ApiResponse<Vec<navigation_models::CategoryNode>>,
            ApiResponse<Vec<navigation_models::FlatSubcategory>>,
            ApiResponse<navigation_dtos::LandingResponseDto>,
            // Search
            search_models::SearchResult,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Subcategories
            subcategories_dtos::SubcategoryRequestDto,
            subcategories_dtos::SubcategoryResponseDto,
            ApiResponse<subcategories_dtos::SubcategoryResponseDto>,
            ApiResponse<Vec<subcategories_dtos::SubcategoryResponseDto>>,
            // Documents
            documents_dtos::CreateDocumentDto,
            documents_dtos::UpdateDocumentDto,
            documents_dtos::QuickEditDto,
            documents_dtos::DocumentResponseDto,
            documents_dtos::DocumentSummaryDto,
            documents_dtos::DocumentListItemDto,
            documents_dtos::DocumentContentDto,
            documents_dtos::PublicDocumentDto,
            ApiResponse<documents_dtos::DocumentResponseDto>,
            ApiResponse<documents_dtos::DocumentContentDto>,
            ApiResponse<documents_dtos::PublicDocumentDto>,
            ApiResponse<Vec<documents_dtos::DocumentSummaryDto>>,
            ApiResponse<Vec<documents_dtos::DocumentListItemDto>>,
            // Settings
            settings_dtos::UpdateSettingDto,
            settings_dtos::SettingResponseDto,
            settings_dtos::PublicSettingsDto,
            ApiResponse<settings_dtos::SettingResponseDto>,
            ApiResponse<Vec<settings_dtos::SettingResponseDto>>,
            ApiResponse<settings_dtos::PublicSettingsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "navigation", description = "Category, subcategory and guide structure"),
        (name = "documents", description = "Markdown documents"),
        (name = "search", description = "Type-ahead search over published documents"),
        (name = "settings", description = "Site settings (logo, title, landing page)"),
        (name = "users", description = "Admin accounts"),
        (name = "categories", description = "Top-level categories"),
        (name = "subcategories", description = "Nested subcategories"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Docs Portal API",
        version = "0.1.0",
        description = "API documentation for the documentation portal",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/navigation"));
        assert!(paths.contains_key("/api/search"));
        assert!(paths.contains_key("/api/docs/{category}/{subcategory}/{document}"));
        assert!(paths.contains_key("/api/admin/subcategories/{id}/children"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
