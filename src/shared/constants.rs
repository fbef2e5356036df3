/// Maximum number of results returned by the type-ahead search
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Prefix of canonical document URLs
pub const DOCS_URL_PREFIX: &str = "/docs";

/// Indentation unit used for flattened subcategory labels
pub const INDENT_UNIT: &str = "  ";

// =============================================================================
// DEFAULT ICONS
// =============================================================================

pub const DEFAULT_CATEGORY_ICON: &str = "fa-folder";

pub const DEFAULT_SUBCATEGORY_ICON: &str = "fa-folder-open";

// =============================================================================
// SETTING KEYS
// =============================================================================

/// Logo URL or Font Awesome class shown in the header
pub const SETTING_LOGO: &str = "logo";

/// Either "fontawesome" or "image", qualifies [`SETTING_LOGO`]
pub const SETTING_LOGO_TYPE: &str = "logo_type";

/// Markdown rendered on the landing page when no guide exists yet
pub const SETTING_LANDING_MARKDOWN: &str = "landing_markdown";

/// Overrides the configured site title
pub const SETTING_SITE_TITLE: &str = "site_title";

/// Settings exposed to unauthenticated readers
pub const PUBLIC_SETTING_KEYS: [&str; 3] = [SETTING_LOGO, SETTING_LOGO_TYPE, SETTING_SITE_TITLE];

/// Landing page body used until an admin sets [`SETTING_LANDING_MARKDOWN`]
pub const DEFAULT_LANDING_MARKDOWN: &str =
    "# Welcome\n\nNo guides have been published yet. Sign in to the admin panel to add the first one.";
