use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::categories::CategoryService;
use crate::features::documents::models::DocumentSummary;
use crate::features::documents::DocumentService;
use crate::features::navigation::models::{CategoryNode, SubcategoryNode};
use crate::features::navigation::tree::{
    build_tree, GuideSource, HiddenPolicy, TreeError, TreeOptions,
};
use crate::features::subcategories::models::Subcategory;
use crate::features::subcategories::SubcategoryService;

/// Assembles the category, subcategory and guide structure per request
pub struct StructureLoader {
    categories: Arc<CategoryService>,
    subcategories: Arc<SubcategoryService>,
    documents: Arc<DocumentService>,
    hidden_policy: HiddenPolicy,
}

impl StructureLoader {
    pub fn new(
        categories: Arc<CategoryService>,
        subcategories: Arc<SubcategoryService>,
        documents: Arc<DocumentService>,
        hidden_policy: HiddenPolicy,
    ) -> Self {
        Self {
            categories,
            subcategories,
            documents,
            hidden_policy,
        }
    }

    /// Public structure.
    ///
    /// Never fails: on a storage error the failure is logged and an empty
    /// structure is returned, so readers get an empty navigation instead of
    /// an error page.
    pub async fn load(&self) -> Vec<CategoryNode> {
        match self.try_load(false).await {
            Ok(structure) => structure,
            Err(e) => {
                tracing::error!("Failed to load navigation structure: {}", e);
                Vec::new()
            }
        }
    }

    /// Structure for the admin panel: hidden nodes and drafts included
    pub async fn load_admin(&self) -> Result<Vec<CategoryNode>> {
        self.try_load(true).await
    }

    pub async fn try_load(&self, include_hidden: bool) -> Result<Vec<CategoryNode>> {
        let categories = self.categories.fetch_all().await?;
        let subcategories = self.subcategories.fetch_all().await?;
        let documents = self.documents.fetch_summaries(!include_hidden).await?;

        Ok(assemble(
            categories,
            subcategories,
            documents,
            include_hidden,
            self.hidden_policy,
        )?)
    }
}

/// Build the structure from already fetched rows
pub fn assemble(
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    documents: Vec<DocumentSummary>,
    include_hidden: bool,
    hidden_policy: HiddenPolicy,
) -> std::result::Result<Vec<CategoryNode>, TreeError> {
    let mut rows_by_category: HashMap<i64, Vec<Subcategory>> = HashMap::new();
    for row in subcategories {
        rows_by_category.entry(row.category_id).or_default().push(row);
    }

    let mut documents_by_subcategory: HashMap<i64, Vec<DocumentSummary>> = HashMap::new();
    for document in documents {
        documents_by_subcategory
            .entry(document.subcategory_id)
            .or_default()
            .push(document);
    }

    let mut categories = categories;
    categories.sort_by(|a, b| {
        a.order_index
            .cmp(&b.order_index)
            .then_with(|| a.name.cmp(&b.name))
            .then(a.id.cmp(&b.id))
    });

    categories
        .into_iter()
        .filter(|category| include_hidden || !category.is_hidden)
        .map(|category| {
            let rows = rows_by_category
                .get(&category.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let options = TreeOptions {
                include_hidden,
                hidden_policy,
                guides: Some(GuideSource {
                    category_slug: &category.slug,
                    documents: &documents_by_subcategory,
                }),
            };
            let subcategories = build_tree(rows, None, category.id, &options)?;

            Ok(CategoryNode {
                icon: category.icon(),
                id: category.id,
                name: category.name,
                display_name: category.display_name,
                slug: category.slug,
                is_hidden: category.is_hidden,
                order_index: category.order_index,
                subcategories,
            })
        })
        .collect()
}

/// Path of the first guide in navigation order, used as the landing redirect
pub fn first_guide_path(structure: &[CategoryNode]) -> Option<String> {
    fn first_in(nodes: &[SubcategoryNode]) -> Option<&str> {
        nodes.iter().find_map(|node| {
            node.guides
                .first()
                .map(|guide| guide.path.as_str())
                .or_else(|| first_in(&node.subcategories))
        })
    }

    structure
        .iter()
        .find_map(|category| first_in(&category.subcategories))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use crate::shared::types::IconType;
    use chrono::NaiveDate;
    use sqlx::SqlitePool;

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn category(id: i64, slug: &str, order_index: i64, hidden: bool) -> Category {
        Category {
            id,
            name: slug.to_string(),
            display_name: slug.to_uppercase(),
            slug: slug.to_string(),
            icon: "fa-folder".to_string(),
            icon_type: IconType::Fontawesome,
            order_index,
            is_hidden: hidden,
            created_at: timestamp(),
        }
    }

    fn subcategory(id: i64, category_id: i64, parent: Option<i64>, slug: &str, hidden: bool) -> Subcategory {
        Subcategory {
            id,
            category_id,
            parent_subcategory_id: parent,
            name: slug.to_string(),
            display_name: slug.to_string(),
            slug: slug.to_string(),
            icon: "fa-folder-open".to_string(),
            icon_type: IconType::Fontawesome,
            order_index: 0,
            is_hidden: hidden,
            created_at: timestamp(),
        }
    }

    fn document(id: i64, subcategory_id: i64, slug: &str) -> DocumentSummary {
        DocumentSummary {
            id,
            subcategory_id,
            title: slug.to_string(),
            slug: slug.to_string(),
            description: None,
            order_index: 0,
            is_published: true,
        }
    }

    fn loader(pool: SqlitePool, hidden_policy: HiddenPolicy) -> StructureLoader {
        StructureLoader::new(
            Arc::new(CategoryService::new(pool.clone())),
            Arc::new(SubcategoryService::new(pool.clone())),
            Arc::new(DocumentService::new(pool)),
            hidden_policy,
        )
    }

    async fn insert(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
    }

    /// Category `a` -> subcategory `b` -> hidden subcategory `c` holding document `d`
    async fn seed_hidden_scenario(pool: &SqlitePool) {
        let a = insert(
            pool,
            "INSERT INTO categories (name, display_name, slug) VALUES ('a', 'A', 'a') RETURNING id",
        )
        .await;
        let b = insert(
            pool,
            &format!(
                "INSERT INTO subcategories (category_id, name, display_name, slug) VALUES ({}, 'b', 'B', 'b') RETURNING id",
                a
            ),
        )
        .await;
        let c = insert(
            pool,
            &format!(
                "INSERT INTO subcategories (category_id, parent_subcategory_id, name, display_name, slug, is_hidden) VALUES ({}, {}, 'c', 'C', 'c', 1) RETURNING id",
                a, b
            ),
        )
        .await;
        insert(
            pool,
            &format!(
                "INSERT INTO documents (subcategory_id, title, slug, content) VALUES ({}, 'D', 'd', 'body') RETURNING id",
                c
            ),
        )
        .await;
    }

    #[tokio::test]
    async fn test_public_structure_excludes_hidden_subtree() {
        let pool = test_pool().await;
        seed_hidden_scenario(&pool).await;

        let structure = loader(pool, HiddenPolicy::Prune).load().await;

        assert_eq!(structure.len(), 1);
        assert_eq!(structure[0].slug, "a");
        let b = &structure[0].subcategories;
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].slug, "b");
        assert!(b[0].subcategories.is_empty());
        assert!(b[0].guides.is_empty());
        assert_eq!(first_guide_path(&structure), None);
    }

    #[tokio::test]
    async fn test_admin_structure_includes_hidden_nodes() {
        let pool = test_pool().await;
        seed_hidden_scenario(&pool).await;

        let structure = loader(pool, HiddenPolicy::Prune).load_admin().await.unwrap();

        let c = &structure[0].subcategories[0].subcategories[0];
        assert!(c.is_hidden);
        assert_eq!(c.guides[0].path, "a/c/d");
        assert_eq!(first_guide_path(&structure).as_deref(), Some("a/c/d"));
    }

    #[tokio::test]
    async fn test_load_degrades_to_empty_on_store_failure() {
        let pool = test_pool().await;
        seed_hidden_scenario(&pool).await;
        let loader = loader(pool.clone(), HiddenPolicy::Prune);

        pool.close().await;

        assert!(loader.load().await.is_empty());
        assert!(loader.load_admin().await.is_err());
    }

    #[test]
    fn test_assemble_filters_hidden_categories_and_orders_them() {
        let categories = vec![
            category(1, "zeta", 0, false),
            category(2, "alpha", 0, false),
            category(3, "secret", 0, true),
            category(4, "first", -1, false),
        ];

        let public = assemble(categories.clone(), vec![], vec![], false, HiddenPolicy::Prune).unwrap();
        let slugs: Vec<&str> = public.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "alpha", "zeta"]);

        let admin = assemble(categories, vec![], vec![], true, HiddenPolicy::Prune).unwrap();
        assert_eq!(admin.len(), 4);
    }

    #[test]
    fn test_assemble_with_hoist_keeps_visible_descendants() {
        let categories = vec![category(1, "a", 0, false)];
        let subcategories = vec![
            subcategory(10, 1, None, "b", false),
            subcategory(11, 1, Some(10), "c", true),
            subcategory(12, 1, Some(11), "e", false),
        ];
        let documents = vec![document(100, 11, "d"), document(101, 12, "f")];

        let structure =
            assemble(categories, subcategories, documents, false, HiddenPolicy::Hoist).unwrap();

        let b = &structure[0].subcategories[0];
        assert_eq!(b.subcategories.len(), 1);
        assert_eq!(b.subcategories[0].slug, "e");
        assert_eq!(b.subcategories[0].guides[0].path, "a/e/f");
        assert_eq!(first_guide_path(&structure).as_deref(), Some("a/e/f"));
    }

    #[test]
    fn test_same_subcategory_slug_in_two_categories() {
        let categories = vec![category(1, "java", 0, false), category(2, "bedrock", 1, false)];
        let subcategories = vec![
            subcategory(10, 1, None, "setup", false),
            subcategory(20, 2, None, "setup", false),
        ];
        let documents = vec![document(100, 10, "install"), document(200, 20, "install")];

        let structure =
            assemble(categories, subcategories, documents, false, HiddenPolicy::Prune).unwrap();

        assert_eq!(structure[0].subcategories[0].guides[0].path, "java/setup/install");
        assert_eq!(structure[1].subcategories[0].guides[0].path, "bedrock/setup/install");
    }

    #[test]
    fn test_first_guide_path_skips_empty_subcategories() {
        let categories = vec![category(1, "empty", 0, false), category(2, "docs", 1, false)];
        let subcategories = vec![
            subcategory(10, 1, None, "nothing", false),
            subcategory(20, 2, None, "start", false),
        ];
        let documents = vec![document(100, 20, "intro")];

        let structure =
            assemble(categories, subcategories, documents, false, HiddenPolicy::Prune).unwrap();

        assert_eq!(first_guide_path(&structure).as_deref(), Some("docs/start/intro"));
        assert_eq!(first_guide_path(&[]), None);
    }
}
