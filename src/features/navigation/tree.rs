//! Subcategory tree construction.
//!
//! Rows are indexed once by parent id (row indices into the input slice), so
//! building a tree or a flat indented list is linear in the number of rows.
//! Traversal keeps a visited set: a subcategory reachable twice (a cycle in
//! `parent_subcategory_id`) is emitted only once and the cut is logged.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::features::documents::models::DocumentSummary;
use crate::features::navigation::models::{FlatSubcategory, GuideNode, SubcategoryNode};
use crate::features::subcategories::models::Subcategory;
use crate::shared::constants::{DOCS_URL_PREFIX, INDENT_UNIT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid tree input: {0}")]
    InvalidInput(String),
}

/// What happens to the visible descendants of a hidden subcategory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HiddenPolicy {
    /// The whole subtree disappears, documents included
    #[default]
    Prune,
    /// Only the hidden node disappears; its visible children take its place
    Hoist,
}

impl FromStr for HiddenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prune" => Ok(Self::Prune),
            "hoist" => Ok(Self::Hoist),
            other => Err(format!(
                "Unknown hidden subtree policy '{}', expected 'prune' or 'hoist'",
                other
            )),
        }
    }
}

impl fmt::Display for HiddenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prune => write!(f, "prune"),
            Self::Hoist => write!(f, "hoist"),
        }
    }
}

/// Documents to attach as guides, keyed by subcategory id
pub struct GuideSource<'a> {
    pub category_slug: &'a str,
    pub documents: &'a HashMap<i64, Vec<DocumentSummary>>,
}

#[derive(Default)]
pub struct TreeOptions<'a> {
    pub include_hidden: bool,
    pub hidden_policy: HiddenPolicy,
    /// `None` builds a bare tree without guides
    pub guides: Option<GuideSource<'a>>,
}

/// Parent id to ordered child row indices
struct SubcategoryIndex<'a> {
    rows: &'a [Subcategory],
    children: HashMap<Option<i64>, Vec<usize>>,
}

impl<'a> SubcategoryIndex<'a> {
    fn new(rows: &'a [Subcategory]) -> Result<Self, TreeError> {
        let mut ids = HashSet::with_capacity(rows.len());
        let mut children: HashMap<Option<i64>, Vec<usize>> = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            if !ids.insert(row.id) {
                return Err(TreeError::InvalidInput(format!(
                    "subcategory id {} appears more than once",
                    row.id
                )));
            }
            children
                .entry(row.parent_subcategory_id)
                .or_default()
                .push(idx);
        }

        for siblings in children.values_mut() {
            siblings.sort_by(|&a, &b| {
                let (a, b) = (&rows[a], &rows[b]);
                a.order_index
                    .cmp(&b.order_index)
                    .then_with(|| a.name.cmp(&b.name))
                    .then(a.id.cmp(&b.id))
            });
        }

        Ok(Self { rows, children })
    }

    fn children_of(&self, parent: Option<i64>) -> impl Iterator<Item = &'a Subcategory> + '_ {
        let rows = self.rows;
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .map(move |&idx| &rows[idx])
    }
}

/// Build the nested subcategory tree below `parent_id` for one category.
///
/// `parent_id = None` starts at the category's top level. Rows of other
/// categories are ignored.
pub fn build_tree(
    rows: &[Subcategory],
    parent_id: Option<i64>,
    category_id: i64,
    options: &TreeOptions<'_>,
) -> Result<Vec<SubcategoryNode>, TreeError> {
    let index = SubcategoryIndex::new(rows)?;
    let mut visited: HashSet<i64> = parent_id.into_iter().collect();
    let mut nodes = Vec::new();

    collect_nodes(&index, parent_id, category_id, options, &mut visited, &mut nodes);

    Ok(nodes)
}

fn collect_nodes(
    index: &SubcategoryIndex<'_>,
    parent: Option<i64>,
    category_id: i64,
    options: &TreeOptions<'_>,
    visited: &mut HashSet<i64>,
    out: &mut Vec<SubcategoryNode>,
) {
    for row in index.children_of(parent) {
        if row.category_id != category_id {
            continue;
        }
        if !visited.insert(row.id) {
            tracing::warn!(
                subcategory_id = row.id,
                parent_id = ?parent,
                "Subcategory cycle detected, node already emitted"
            );
            continue;
        }

        if row.is_hidden && !options.include_hidden {
            if options.hidden_policy == HiddenPolicy::Hoist {
                collect_nodes(index, Some(row.id), category_id, options, visited, out);
            }
            continue;
        }

        let mut children = Vec::new();
        collect_nodes(index, Some(row.id), category_id, options, visited, &mut children);

        out.push(SubcategoryNode {
            id: row.id,
            category_id: row.category_id,
            parent_subcategory_id: row.parent_subcategory_id,
            name: row.name.clone(),
            display_name: row.display_name.clone(),
            slug: row.slug.clone(),
            icon: row.icon(),
            is_hidden: row.is_hidden,
            order_index: row.order_index,
            subcategories: children,
            guides: guides_for(row, options.guides.as_ref()),
        });
    }
}

fn guides_for(row: &Subcategory, source: Option<&GuideSource<'_>>) -> Vec<GuideNode> {
    let Some(source) = source else {
        return Vec::new();
    };
    let Some(documents) = source.documents.get(&row.id) else {
        return Vec::new();
    };

    let mut documents: Vec<&DocumentSummary> = documents.iter().collect();
    documents.sort_by(|a, b| {
        a.order_index
            .cmp(&b.order_index)
            .then_with(|| a.title.cmp(&b.title))
            .then(a.id.cmp(&b.id))
    });

    documents
        .into_iter()
        .map(|doc| {
            let path = format!("{}/{}/{}", source.category_slug, row.slug, doc.slug);
            GuideNode {
                id: doc.id,
                title: doc.title.clone(),
                slug: doc.slug.clone(),
                description: doc.description.clone(),
                url: format!("{}/{}", DOCS_URL_PREFIX, path),
                path,
                is_published: doc.is_published,
            }
        })
        .collect()
}

fn indented(level: usize, display_name: &str) -> String {
    format!("{}{}", INDENT_UNIT.repeat(level), display_name)
}

/// Pre-order list of every subcategory reachable from the top level, hidden
/// ones included, annotated with depth and an indented label.
pub fn flatten_with_indent(rows: &[Subcategory]) -> Result<Vec<FlatSubcategory>, TreeError> {
    let index = SubcategoryIndex::new(rows)?;
    let mut visited = HashSet::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());

    walk_flat(&index, None, 0, &mut visited, &mut out);

    Ok(out)
}

fn walk_flat(
    index: &SubcategoryIndex<'_>,
    parent: Option<i64>,
    level: usize,
    visited: &mut HashSet<i64>,
    out: &mut Vec<FlatSubcategory>,
) {
    for row in index.children_of(parent) {
        if !visited.insert(row.id) {
            tracing::warn!(
                subcategory_id = row.id,
                "Subcategory cycle detected while flattening"
            );
            continue;
        }

        out.push(FlatSubcategory {
            id: row.id,
            category_id: row.category_id,
            parent_subcategory_id: row.parent_subcategory_id,
            name: row.name.clone(),
            display_name: row.display_name.clone(),
            slug: row.slug.clone(),
            icon: row.icon(),
            is_hidden: row.is_hidden,
            order_index: row.order_index,
            level,
            indented_name: indented(level, &row.display_name),
        });

        walk_flat(index, Some(row.id), level + 1, visited, out);
    }
}

/// Pre-order flatten of an already built tree
#[cfg(test)]
pub(crate) fn flatten_tree(nodes: &[SubcategoryNode]) -> Vec<FlatSubcategory> {
    fn walk(nodes: &[SubcategoryNode], level: usize, out: &mut Vec<FlatSubcategory>) {
        for node in nodes {
            out.push(FlatSubcategory {
                id: node.id,
                category_id: node.category_id,
                parent_subcategory_id: node.parent_subcategory_id,
                name: node.name.clone(),
                display_name: node.display_name.clone(),
                slug: node.slug.clone(),
                icon: node.icon.clone(),
                is_hidden: node.is_hidden,
                order_index: node.order_index,
                level,
                indented_name: indented(level, &node.display_name),
            });
            walk(&node.subcategories, level + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

/// Whether moving subcategory `id` under `new_parent` would make it its own
/// ancestor.
pub fn would_create_cycle(rows: &[Subcategory], id: i64, new_parent: Option<i64>) -> bool {
    let parents: HashMap<i64, Option<i64>> = rows
        .iter()
        .map(|row| (row.id, row.parent_subcategory_id))
        .collect();

    let mut seen = HashSet::new();
    let mut current = new_parent;
    while let Some(node) = current {
        if node == id {
            return true;
        }
        if !seen.insert(node) {
            // Already cyclic above this point, but not through `id`
            return false;
        }
        current = parents.get(&node).copied().flatten();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::IconType;
    use chrono::NaiveDate;

    fn row(id: i64, parent: Option<i64>, name: &str, order_index: i64, hidden: bool) -> Subcategory {
        Subcategory {
            id,
            category_id: 1,
            parent_subcategory_id: parent,
            name: name.to_string(),
            display_name: name.to_uppercase(),
            slug: name.to_lowercase(),
            icon: "fa-folder-open".to_string(),
            icon_type: IconType::Fontawesome,
            order_index,
            is_hidden: hidden,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn doc(id: i64, subcategory_id: i64, slug: &str, order_index: i64) -> DocumentSummary {
        DocumentSummary {
            id,
            subcategory_id,
            title: slug.to_string(),
            slug: slug.to_string(),
            description: None,
            order_index,
            is_published: true,
        }
    }

    fn ids(nodes: &[SubcategoryNode]) -> Vec<i64> {
        flatten_tree(nodes).into_iter().map(|n| n.id).collect()
    }

    fn public(policy: HiddenPolicy) -> TreeOptions<'static> {
        TreeOptions {
            include_hidden: false,
            hidden_policy: policy,
            guides: None,
        }
    }

    fn all() -> TreeOptions<'static> {
        TreeOptions {
            include_hidden: true,
            ..Default::default()
        }
    }

    /// Deterministic pseudo-random acyclic row sets of varying shape
    fn generated_rows(seed: u64, count: i64) -> Vec<Subcategory> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            state >> 33
        };

        let mut rows: Vec<Subcategory> = (1..=count)
            .map(|id| {
                let parent = match next() % 3 {
                    0 => None,
                    _ if id > 1 => Some((next() % (id as u64 - 1)) as i64 + 1),
                    _ => None,
                };
                let order = (next() % 4) as i64;
                let hidden = next() % 5 == 0;
                row(id, parent, &format!("n{}", next() % 7), order, hidden)
            })
            .collect();

        // Store order must not matter
        rows.reverse();
        rows
    }

    #[test]
    fn test_build_tree_nests_and_orders_siblings() {
        let rows = vec![
            row(3, Some(1), "zeta", 0, false),
            row(2, Some(1), "alpha", 0, false),
            row(1, None, "root", 0, false),
            row(4, None, "first", -1, false),
        ];

        let tree = build_tree(&rows, None, 1, &all()).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, 4);
        assert_eq!(tree[1].id, 1);
        let children: Vec<i64> = tree[1].subcategories.iter().map(|n| n.id).collect();
        assert_eq!(children, vec![2, 3]);
    }

    #[test]
    fn test_build_tree_from_inner_parent() {
        let rows = vec![
            row(1, None, "root", 0, false),
            row(2, Some(1), "child", 0, false),
            row(3, Some(2), "grandchild", 0, false),
        ];

        let tree = build_tree(&rows, Some(1), 1, &all()).unwrap();

        assert_eq!(ids(&tree), vec![2, 3]);
    }

    #[test]
    fn test_build_tree_ignores_other_categories() {
        let mut foreign = row(2, None, "foreign", 0, false);
        foreign.category_id = 2;
        let rows = vec![row(1, None, "mine", 0, false), foreign];

        assert_eq!(ids(&build_tree(&rows, None, 1, &all()).unwrap()), vec![1]);
        assert_eq!(ids(&build_tree(&rows, None, 2, &all()).unwrap()), vec![2]);
    }

    #[test]
    fn test_tree_flatten_matches_flatten_with_indent() {
        for seed in 0..50 {
            let rows = generated_rows(seed, 1 + (seed as i64 % 25));

            let tree = build_tree(&rows, None, 1, &all()).unwrap();
            let from_tree = flatten_tree(&tree);
            let flat = flatten_with_indent(&rows).unwrap();

            assert_eq!(from_tree, flat, "seed {}", seed);
            assert_eq!(flat.len(), rows.len(), "seed {}", seed);
        }
    }

    #[test]
    fn test_flatten_levels_and_indentation() {
        let rows = vec![
            row(1, None, "root", 0, false),
            row(2, Some(1), "child", 0, true),
            row(3, Some(2), "leaf", 0, false),
        ];

        let flat = flatten_with_indent(&rows).unwrap();

        let levels: Vec<usize> = flat.iter().map(|f| f.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
        assert_eq!(flat[0].indented_name, "ROOT");
        assert_eq!(flat[1].indented_name, "  CHILD");
        assert_eq!(flat[2].indented_name, "    LEAF");
        // Hidden rows are listed too
        assert!(flat[1].is_hidden);
    }

    #[test]
    fn test_flatten_levels_follow_parents() {
        for seed in 0..30 {
            let rows = generated_rows(seed, 20);
            let flat = flatten_with_indent(&rows).unwrap();
            let levels: HashMap<i64, usize> = flat.iter().map(|f| (f.id, f.level)).collect();

            for entry in &flat {
                match entry.parent_subcategory_id {
                    None => assert_eq!(entry.level, 0),
                    Some(parent) => assert_eq!(entry.level, levels[&parent] + 1),
                }
                assert_eq!(
                    entry.indented_name,
                    format!("{}{}", "  ".repeat(entry.level), entry.display_name)
                );
            }
        }
    }

    #[test]
    fn test_prune_drops_hidden_subtree() {
        let rows = vec![
            row(1, None, "visible", 0, false),
            row(2, None, "hidden", 1, true),
            row(3, Some(2), "under-hidden", 0, false),
            row(4, Some(1), "nested-hidden", 0, true),
            row(5, Some(4), "deep", 0, false),
        ];

        let tree = build_tree(&rows, None, 1, &public(HiddenPolicy::Prune)).unwrap();

        assert_eq!(ids(&tree), vec![1]);
    }

    #[test]
    fn test_hoist_splices_visible_children() {
        let rows = vec![
            row(1, None, "a", 0, false),
            row(2, None, "hidden", 1, true),
            row(3, Some(2), "x", 0, false),
            row(4, Some(2), "y", 1, true),
            row(5, Some(4), "z", 0, false),
            row(6, None, "c", 2, false),
        ];

        let tree = build_tree(&rows, None, 1, &public(HiddenPolicy::Hoist)).unwrap();

        let top: Vec<i64> = tree.iter().map(|n| n.id).collect();
        assert_eq!(top, vec![1, 3, 5, 6]);
        assert!(flatten_tree(&tree).iter().all(|n| !n.is_hidden));
    }

    #[test]
    fn test_hidden_scenario_excludes_hidden_and_its_documents() {
        // A -> B -> C(hidden) holding D
        let rows = vec![
            row(10, None, "b", 0, false),
            row(11, Some(10), "c", 0, true),
        ];
        let mut documents = HashMap::new();
        documents.insert(11, vec![doc(100, 11, "d", 0)]);
        let options = TreeOptions {
            include_hidden: false,
            hidden_policy: HiddenPolicy::Prune,
            guides: Some(GuideSource {
                category_slug: "a",
                documents: &documents,
            }),
        };

        let tree = build_tree(&rows, None, 1, &options).unwrap();

        assert_eq!(ids(&tree), vec![10]);
        assert!(tree[0].guides.is_empty());
        assert!(tree[0].subcategories.is_empty());
    }

    #[test]
    fn test_guides_are_attached_with_paths() {
        let rows = vec![row(1, None, "setup", 0, false)];
        let mut documents = HashMap::new();
        documents.insert(1, vec![doc(2, 1, "second", 1), doc(1, 1, "first", 0)]);
        let options = TreeOptions {
            guides: Some(GuideSource {
                category_slug: "minecraft",
                documents: &documents,
            }),
            ..Default::default()
        };

        let tree = build_tree(&rows, None, 1, &options).unwrap();

        let guides = &tree[0].guides;
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].path, "minecraft/setup/first");
        assert_eq!(guides[0].url, "/docs/minecraft/setup/first");
        assert_eq!(guides[1].slug, "second");
    }

    #[test]
    fn test_cycles_are_cut() {
        let rows = vec![
            row(1, None, "root", 0, false),
            row(2, Some(3), "two", 0, false),
            row(3, Some(2), "three", 0, false),
            row(4, Some(4), "self", 0, false),
        ];

        // Nodes caught in a cycle are unreachable from the top level
        assert_eq!(ids(&build_tree(&rows, None, 1, &all()).unwrap()), vec![1]);
        assert_eq!(flatten_with_indent(&rows).unwrap().len(), 1);

        // Starting inside the cycle stops when it comes back around
        assert_eq!(ids(&build_tree(&rows, Some(2), 1, &all()).unwrap()), vec![3]);
        assert!(build_tree(&rows, Some(4), 1, &all()).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_invalid_input() {
        let rows = vec![row(1, None, "a", 0, false), row(1, None, "b", 0, false)];

        assert!(matches!(
            build_tree(&rows, None, 1, &all()),
            Err(TreeError::InvalidInput(_))
        ));
        assert!(matches!(
            flatten_with_indent(&rows),
            Err(TreeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_build_and_flatten_are_idempotent() {
        let rows = generated_rows(7, 30);

        let first = flatten_tree(&build_tree(&rows, None, 1, &all()).unwrap());
        let second = flatten_tree(&build_tree(&rows, None, 1, &all()).unwrap());
        assert_eq!(first, second);

        let hoisted = build_tree(&rows, None, 1, &public(HiddenPolicy::Hoist)).unwrap();
        assert_eq!(
            hoisted,
            build_tree(&rows, None, 1, &public(HiddenPolicy::Hoist)).unwrap()
        );
    }

    #[test]
    fn test_slug_collisions_across_categories_are_kept() {
        let mut other = row(2, None, "setup", 0, false);
        other.category_id = 2;
        let rows = vec![row(1, None, "setup", 0, false), other];

        let first = build_tree(&rows, None, 1, &all()).unwrap();
        let second = build_tree(&rows, None, 2, &all()).unwrap();

        assert_eq!(first[0].slug, second[0].slug);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_would_create_cycle() {
        let rows = vec![
            row(1, None, "root", 0, false),
            row(2, Some(1), "child", 0, false),
            row(3, Some(2), "grandchild", 0, false),
        ];

        assert!(would_create_cycle(&rows, 1, Some(3)));
        assert!(would_create_cycle(&rows, 2, Some(2)));
        assert!(!would_create_cycle(&rows, 3, Some(1)));
        assert!(!would_create_cycle(&rows, 2, None));
    }

    #[test]
    fn test_hidden_policy_from_str() {
        assert_eq!("prune".parse::<HiddenPolicy>(), Ok(HiddenPolicy::Prune));
        assert_eq!(" Hoist ".parse::<HiddenPolicy>(), Ok(HiddenPolicy::Hoist));
        assert!("keep".parse::<HiddenPolicy>().is_err());
        assert_eq!(HiddenPolicy::default().to_string(), "prune");
    }
}
