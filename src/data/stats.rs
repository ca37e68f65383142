use std::collections::{BTreeMap, BTreeSet};

use super::model::{CatalogSet, Color, Theme};

// ---------------------------------------------------------------------------
// Scalar aggregates
// ---------------------------------------------------------------------------

/// Number of distinct color names (several ids can share a name).
pub fn distinct_color_names(colors: &[Color]) -> usize {
    colors
        .iter()
        .map(|c| c.name.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Distribution of the transparency flag over the color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransparencyCounts {
    pub opaque: usize,
    pub transparent: usize,
}

impl TransparencyCounts {
    pub fn total(&self) -> usize {
        self.opaque + self.transparent
    }
}

pub fn transparency_counts(colors: &[Color]) -> TransparencyCounts {
    let mut counts = TransparencyCounts::default();
    for color in colors {
        if color.is_trans {
            counts.transparent += 1;
        } else {
            counts.opaque += 1;
        }
    }
    counts
}

/// The earliest release year and every set released that year.
/// `None` when the set table is empty.
pub fn first_year_sets(sets: &[CatalogSet]) -> Option<(i32, Vec<&CatalogSet>)> {
    let first_year = sets.iter().map(|s| s.year).min()?;
    let released = sets.iter().filter(|s| s.year == first_year).collect();
    Some((first_year, released))
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Top `n` sets by part count, descending. Ties keep table order.
pub fn top_sets_by_parts<'a>(sets: &'a [CatalogSet], n: usize) -> Vec<&'a CatalogSet> {
    let mut ranked: Vec<&CatalogSet> = sets.iter().collect();
    // Vec::sort_by is stable, so equal part counts preserve source order.
    ranked.sort_by(|a, b| b.num_parts.cmp(&a.num_parts));
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Grouped aggregates (by release year)
// ---------------------------------------------------------------------------

/// Number of sets released per year.
pub fn sets_per_year(sets: &[CatalogSet]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for set in sets {
        *counts.entry(set.year).or_insert(0) += 1;
    }
    counts
}

/// Number of distinct themes with at least one release per year.
pub fn themes_per_year(sets: &[CatalogSet]) -> BTreeMap<i32, usize> {
    let mut themes: BTreeMap<i32, BTreeSet<u32>> = BTreeMap::new();
    for set in sets {
        themes.entry(set.year).or_default().insert(set.theme_id);
    }
    themes.into_iter().map(|(y, ids)| (y, ids.len())).collect()
}

/// Mean part count per release year.
pub fn mean_parts_per_year(sets: &[CatalogSet]) -> BTreeMap<i32, f64> {
    let mut totals: BTreeMap<i32, (u64, usize)> = BTreeMap::new();
    for set in sets {
        let entry = totals.entry(set.year).or_insert((0, 0));
        entry.0 += u64::from(set.num_parts);
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(year, (sum, count))| (year, sum as f64 / count as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Theme frequency join
// ---------------------------------------------------------------------------

/// One row of the theme-frequency table: set counts joined against theme
/// names on the theme id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSetCount {
    pub id: u32,
    pub name: String,
    pub parent_id: Option<u32>,
    pub set_count: usize,
}

/// Count sets per theme and join the counts with the theme table.
///
/// Inner-join semantics: theme ids that never appear in the set table are
/// dropped, as are set rows referencing an unknown theme. The result is
/// sorted by set count descending (ties by id ascending) and has exactly
/// one row per theme id present in both tables.
pub fn theme_set_counts(sets: &[CatalogSet], themes: &[Theme]) -> Vec<ThemeSetCount> {
    let mut frequency: BTreeMap<u32, usize> = BTreeMap::new();
    for set in sets {
        *frequency.entry(set.theme_id).or_insert(0) += 1;
    }

    let mut rows: Vec<ThemeSetCount> = themes
        .iter()
        .filter_map(|theme| {
            frequency.get(&theme.id).map(|&set_count| ThemeSetCount {
                id: theme.id,
                name: theme.name.clone(),
                parent_id: theme.parent_id,
                set_count,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.set_count.cmp(&a.set_count).then(a.id.cmp(&b.id)));
    rows
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Themes whose name contains `query`, case-insensitively.
pub fn find_themes_by_name<'a>(themes: &'a [Theme], query: &str) -> Vec<&'a Theme> {
    let needle = query.to_lowercase();
    themes
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

/// All sets belonging to the given theme.
pub fn sets_for_theme<'a>(sets: &'a [CatalogSet], theme_id: u32) -> Vec<&'a CatalogSet> {
    sets.iter().filter(|s| s.theme_id == theme_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(id: i32, name: &str, is_trans: bool) -> Color {
        Color {
            id,
            name: name.to_string(),
            rgb: "05131D".to_string(),
            is_trans,
        }
    }

    fn theme(id: u32, name: &str, parent_id: Option<u32>) -> Theme {
        Theme {
            id,
            name: name.to_string(),
            parent_id,
        }
    }

    fn set(set_num: &str, year: i32, theme_id: u32, num_parts: u32) -> CatalogSet {
        CatalogSet {
            set_num: set_num.to_string(),
            name: format!("Set {set_num}"),
            year,
            theme_id,
            num_parts,
        }
    }

    fn sample_sets() -> Vec<CatalogSet> {
        vec![
            set("001-1", 1950, 1, 10),
            set("002-1", 1950, 1, 24),
            set("003-1", 1951, 2, 24),
            set("004-1", 1951, 1, 80),
            set("005-1", 1951, 3, 120),
            set("006-1", 1953, 2, 24),
        ]
    }

    #[test]
    fn distinct_names_ignore_duplicate_ids() {
        let colors = vec![
            color(0, "Black", false),
            color(1, "Blue", false),
            color(2, "Blue", true),
            color(3, "Trans-Clear", true),
        ];
        assert_eq!(distinct_color_names(&colors), 3);
    }

    #[test]
    fn transparency_counts_sum_to_row_count() {
        let colors = vec![
            color(0, "Black", false),
            color(1, "Blue", false),
            color(2, "Trans-Clear", true),
        ];
        let counts = transparency_counts(&colors);
        assert_eq!(counts.opaque, 2);
        assert_eq!(counts.transparent, 1);
        assert_eq!(counts.total(), colors.len());
    }

    #[test]
    fn first_year_picks_minimum_and_its_rows() {
        let sets = sample_sets();
        let (year, released) = first_year_sets(&sets).unwrap();
        assert_eq!(year, 1950);
        assert_eq!(released.len(), 2);
        assert!(first_year_sets(&[]).is_none());
    }

    #[test]
    fn top_sets_descending_and_stable_on_ties() {
        let sets = sample_sets();
        let top = top_sets_by_parts(&sets, 5);
        let parts: Vec<u32> = top.iter().map(|s| s.num_parts).collect();
        assert_eq!(parts, vec![120, 80, 24, 24, 24]);
        // Three sets tie at 24 parts; table order decides.
        let tied: Vec<&str> = top[2..].iter().map(|s| s.set_num.as_str()).collect();
        assert_eq!(tied, vec!["002-1", "003-1", "006-1"]);
    }

    #[test]
    fn top_sets_handles_short_tables() {
        let sets = sample_sets();
        assert_eq!(top_sets_by_parts(&sets, 100).len(), sets.len());
        assert!(top_sets_by_parts(&[], 5).is_empty());
    }

    #[test]
    fn sets_per_year_counts_rows() {
        let counts = sets_per_year(&sample_sets());
        assert_eq!(counts[&1950], 2);
        assert_eq!(counts[&1951], 3);
        assert_eq!(counts[&1953], 1);
        // 1952 had no releases: no entry rather than a zero.
        assert!(!counts.contains_key(&1952));
    }

    #[test]
    fn themes_per_year_counts_distinct_ids() {
        let counts = themes_per_year(&sample_sets());
        assert_eq!(counts[&1950], 1);
        assert_eq!(counts[&1951], 3);
        assert_eq!(counts[&1953], 1);
    }

    #[test]
    fn mean_parts_matches_hand_computed_values() {
        let means = mean_parts_per_year(&sample_sets());
        assert_eq!(means[&1950], 17.0); // (10 + 24) / 2
        assert!((means[&1951] - 224.0 / 3.0).abs() < 1e-9);
        assert_eq!(means[&1953], 24.0);
    }

    #[test]
    fn theme_counts_join_keeps_keys_present_in_both_tables() {
        let themes = vec![
            theme(1, "Town", None),
            theme(2, "Space", None),
            theme(3, "Castle", None),
            theme(9, "Unreleased", None),
        ];
        let rows = theme_set_counts(&sample_sets(), &themes);

        // One row per theme id present in both tables; theme 9 has no sets.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Town");
        assert_eq!(rows[0].set_count, 3);

        // Descending by count, ties broken by id.
        let counts: Vec<usize> = rows.iter().map(|r| r.set_count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
        assert_eq!(rows[1].id, 2);
    }

    #[test]
    fn theme_counts_drop_sets_with_unknown_theme() {
        let themes = vec![theme(1, "Town", None)];
        let mut sets = sample_sets();
        sets.push(set("099-1", 1960, 42, 5)); // no theme 42 in the table
        let rows = theme_set_counts(&sets, &themes);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].set_count, 3);
    }

    #[test]
    fn theme_search_is_case_insensitive_substring() {
        let themes = vec![
            theme(18, "Star Wars", Some(1)),
            theme(158, "Star Wars", None),
            theme(50, "Pirates", None),
        ];
        assert_eq!(find_themes_by_name(&themes, "star wars").len(), 2);
        assert_eq!(find_themes_by_name(&themes, "PIRATE").len(), 1);
        assert!(find_themes_by_name(&themes, "trains").is_empty());
    }

    #[test]
    fn sets_for_theme_filters_by_foreign_key() {
        let sets = sample_sets();
        let town = sets_for_theme(&sets, 1);
        assert_eq!(town.len(), 3);
        assert!(town.iter().all(|s| s.theme_id == 1));
        assert!(sets_for_theme(&sets, 42).is_empty());
    }
}
