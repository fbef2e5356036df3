use crate::features::documents::models::SearchCandidate;
use crate::features::search::models::SearchResult;
use crate::shared::constants::SEARCH_RESULT_LIMIT;
use crate::shared::text::normalize;

/// Filter and order candidates for a query.
///
/// A candidate matches when the normalized query occurs in its title,
/// description, category name or subcategory name. Titles starting with the
/// query come first, then everything by normalized title.
pub fn rank(query: &str, candidates: Vec<SearchCandidate>) -> Vec<SearchResult> {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<(bool, String, SearchCandidate)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let title = normalize(&candidate.title);
            let matched = title.contains(&needle)
                || candidate
                    .description
                    .as_deref()
                    .is_some_and(|d| normalize(d).contains(&needle))
                || normalize(&candidate.category_name).contains(&needle)
                || normalize(&candidate.subcategory_name).contains(&needle);

            matched.then(|| (title.starts_with(&needle), title, candidate))
        })
        .collect();

    // Ties fall back to code-point order of the normalized titles
    hits.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    hits.into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .map(|(_, _, candidate)| candidate.into())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, description: Option<&str>) -> SearchCandidate {
        SearchCandidate {
            title: title.to_string(),
            slug: crate::shared::text::slugify(title),
            description: description.map(str::to_string),
            category_name: "Games".to_string(),
            category_slug: "games".to_string(),
            subcategory_name: "Servers".to_string(),
            subcategory_slug: "servers".to_string(),
        }
    }

    fn titles(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_substring_and_description_matches() {
        let candidates = vec![
            candidate("Minecraft Server Setup", None),
            candidate("Backups", Some("Keep your mine worlds safe")),
            candidate("Networking", Some("Ports and firewalls")),
        ];

        let results = rank("mine", candidates);

        assert_eq!(titles(&results), vec!["Minecraft Server Setup", "Backups"]);
    }

    #[test]
    fn test_accent_insensitive() {
        let results = rank("médoc", vec![candidate("Medoc", None)]);
        assert_eq!(titles(&results), vec!["Medoc"]);

        let results = rank(
            "minecraft",
            vec![
                candidate("Aventuras en Minecraft", None),
                candidate("minero", None),
            ],
        );
        assert_eq!(titles(&results), vec!["Aventuras en Minecraft"]);

        let results = rank("MINÉ", vec![candidate("minero", None)]);
        assert_eq!(titles(&results), vec!["minero"]);
    }

    #[test]
    fn test_category_and_subcategory_names_match() {
        let results = rank("server", vec![candidate("Install", None)]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].subcategory, "Servers");
        assert_eq!(results[0].url, "/docs/games/servers/install");
        assert_eq!(results[0].path, results[0].url);
    }

    #[test]
    fn test_prefix_matches_rank_first_and_cap_applies() {
        let mut candidates: Vec<SearchCandidate> = (0..25)
            .map(|i| candidate(&format!("Guide {:02} for mods", i), None))
            .collect();
        candidates.extend((0..5).map(|i| candidate(&format!("Mods part {}", i), None)));

        let results = rank("mods", candidates);

        assert_eq!(results.len(), 20);
        assert!(results[..5].iter().all(|r| r.title.starts_with("Mods")));
        assert_eq!(results[5].title, "Guide 00 for mods");
        assert_eq!(results[19].title, "Guide 14 for mods");
    }

    #[test]
    fn test_ties_use_code_point_order() {
        let candidates = vec![
            candidate("Mods 9", None),
            candidate("Mods 10", None),
            candidate("Élan mods", None),
            candidate("about mods", None),
        ];

        let results = rank("mods", candidates);

        assert_eq!(
            titles(&results),
            vec!["Mods 10", "Mods 9", "about mods", "Élan mods"]
        );
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        assert!(rank("", vec![candidate("Anything", None)]).is_empty());
        assert!(rank("   ", vec![candidate("Anything", None)]).is_empty());
    }
}
