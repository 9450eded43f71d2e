// ABOUTME: Filter rules deciding which tables are exported without row data
// ABOUTME: Builds the rule set and partitions live table lists

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The built-in rule list shipped with the binary. Revisions happen in the
/// data file so the list stays reviewable.
const DEFAULT_FILTERS: &str = include_str!("default_filters.toml");

/// On-disk shape of a rule file: `tables_to_filter = ["swp_log", ...]`.
#[derive(Debug, Deserialize)]
struct FilterFile {
    #[serde(default)]
    tables_to_filter: Vec<String>,
}

/// A set of table-name fragments marking tables as "no data".
///
/// A table matches when its name contains any fragment anywhere
/// (case-sensitive substring, not prefix/suffix/regex).
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    rules: Vec<String>,
}

/// Result of partitioning a table list against a [`TableFilter`].
///
/// Every input table lands in exactly one of the two lists, and both lists
/// keep the relative order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePartition {
    /// Tables exported schema-only (matched at least one rule).
    pub filtered: Vec<String>,
    /// Tables exported with their data (matched no rule).
    pub normal: Vec<String>,
}

impl TableFilter {
    /// Creates an empty filter (every table keeps its data).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a filter seeded with the built-in default rule list.
    pub fn with_defaults() -> Result<Self> {
        let mut filter = Self::default();
        filter
            .extend_from_toml(DEFAULT_FILTERS)
            .context("Failed to parse the built-in filter list")?;
        Ok(filter)
    }

    /// Builds a filter from explicit rules.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut filter = Self::default();
        for rule in rules {
            filter.add_rule(rule);
        }
        filter
    }

    /// Adds one rule. Exact duplicates are dropped; insertion order is kept.
    pub fn add_rule(&mut self, rule: String) {
        if self.rules.contains(&rule) {
            return;
        }
        if rule.is_empty() {
            tracing::warn!("An empty filter entry matches every table name");
        }
        self.rules.push(rule);
    }

    /// Unions in user-supplied rules from a comma-separated CLI value.
    ///
    /// The value is split on commas exactly as given: surrounding whitespace
    /// stays part of the rule, and an empty segment becomes an empty rule,
    /// which matches every table.
    pub fn extend_from_cli(&mut self, spec: &str) {
        for rule in spec.split(',') {
            self.add_rule(rule.to_string());
        }
    }

    /// Unions in rules from a TOML file with a `tables_to_filter` array.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter file at {}", path.display()))?;
        self.extend_from_toml(&raw)
            .with_context(|| format!("Failed to parse filter file at {}", path.display()))
    }

    fn extend_from_toml(&mut self, raw: &str) -> Result<()> {
        let parsed: FilterFile = toml::from_str(raw)?;
        for rule in parsed.tables_to_filter {
            self.add_rule(rule);
        }
        Ok(())
    }

    /// The current rules, in insertion order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Checks if the filter has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Determines if a table name contains any rule fragment.
    pub fn matches(&self, table: &str) -> bool {
        self.rules.iter().any(|rule| table.contains(rule.as_str()))
    }

    /// Partitions `tables` into filtered (no data) and normal tables.
    ///
    /// Pure function of its inputs: no rules means everything is normal, no
    /// tables means both partitions come back empty.
    pub fn classify(&self, tables: &[String]) -> TablePartition {
        let mut partition = TablePartition::default();
        for table in tables {
            if self.matches(table) {
                partition.filtered.push(table.clone());
            } else {
                partition.normal.push(table.clone());
            }
        }
        partition
    }
}

impl TablePartition {
    /// Total number of tables across both partitions.
    pub fn total(&self) -> usize {
        self.filtered.len() + self.normal.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_is_total_and_disjoint() {
        let filter = TableFilter::from_rules(names(&["log", "index", "wsal"]));
        let tables = names(&[
            "wp_posts",
            "wp_postmeta",
            "wp_swp_log",
            "wp_searchwp_index",
            "wp_wsal_metadata",
            "wp_users",
            "log",
            "",
        ]);

        let partition = filter.classify(&tables);

        assert_eq!(partition.total(), tables.len());

        let filtered: HashSet<&String> = partition.filtered.iter().collect();
        let normal: HashSet<&String> = partition.normal.iter().collect();
        assert!(filtered.is_disjoint(&normal));

        let mut union: Vec<String> = partition.filtered.clone();
        union.extend(partition.normal.clone());
        union.sort();
        let mut input = tables.clone();
        input.sort();
        assert_eq!(union, input);
    }

    #[test]
    fn test_classify_preserves_input_order() {
        let filter = TableFilter::from_rules(names(&["log"]));
        let tables = names(&["z_log", "a_table", "m_log", "b_table", "a_log"]);

        let partition = filter.classify(&tables);

        assert_eq!(partition.filtered, names(&["z_log", "m_log", "a_log"]));
        assert_eq!(partition.normal, names(&["a_table", "b_table"]));
    }

    #[test]
    fn test_substring_semantics() {
        let table = names(&["wp_searchwp_index"]);

        for rule in ["searchwp_index", "archwp", "index"] {
            let filter = TableFilter::from_rules(names(&[rule]));
            let partition = filter.classify(&table);
            assert_eq!(
                partition.filtered, table,
                "rule '{}' should match by substring",
                rule
            );
        }

        // Matching is contiguous containment: 'swp' marks SearchWP 3.x names
        // like wp_swp_index, but wp_searchwp_index does not contain it.
        for rule in ["swp", "swp_log"] {
            let filter = TableFilter::from_rules(names(&[rule]));
            let partition = filter.classify(&table);
            assert!(
                partition.filtered.is_empty(),
                "rule '{}' has no contiguous occurrence in wp_searchwp_index",
                rule
            );
            assert_eq!(partition.normal, table);
        }

        let filter = TableFilter::from_rules(names(&["swp"]));
        let partition = filter.classify(&names(&["wp_swp_index", "wp_posts"]));
        assert_eq!(partition.filtered, names(&["wp_swp_index"]));
        assert_eq!(partition.normal, names(&["wp_posts"]));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = TableFilter::from_rules(names(&["SWP"]));
        assert!(!filter.matches("wp_swp_log"));
        assert!(filter.matches("wp_SWP_log"));
    }

    #[test]
    fn test_empty_rule_matches_every_table() {
        let mut filter = TableFilter::from_rules(names(&["swp_log"]));
        filter.extend_from_cli("");

        let tables = names(&["wp_posts", "wp_options", "anything"]);
        let partition = filter.classify(&tables);

        assert_eq!(partition.filtered, tables);
        assert!(partition.normal.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let filter = TableFilter::from_rules(names(&["log"]));
        let partition = filter.classify(&[]);
        assert!(partition.filtered.is_empty());
        assert!(partition.normal.is_empty());

        let empty = TableFilter::empty();
        assert!(empty.is_empty());
        let tables = names(&["wp_posts", "wp_swp_log"]);
        let partition = empty.classify(&tables);
        assert!(partition.filtered.is_empty());
        assert_eq!(partition.normal, tables);
    }

    #[test]
    fn test_cli_extension_unions_with_existing_rules() {
        let mut filter = TableFilter::from_rules(names(&["redirection_logs"]));
        filter.extend_from_cli("a,b");

        assert_eq!(filter.rules(), &names(&["redirection_logs", "a", "b"])[..]);
        assert!(filter.matches("wp_redirection_logs"));
        assert!(filter.matches("table_a"));
        assert!(filter.matches("b_table"));
    }

    #[test]
    fn test_duplicate_rules_are_harmless() {
        let mut filter = TableFilter::from_rules(names(&["a", "b"]));
        let tables = names(&["table_a", "table_c"]);
        let before = filter.classify(&tables);

        filter.extend_from_cli("a,a,b");

        assert_eq!(filter.rules(), &names(&["a", "b"])[..]);
        assert_eq!(filter.classify(&tables), before);
    }

    #[test]
    fn test_cli_split_is_literal() {
        let mut filter = TableFilter::empty();
        filter.extend_from_cli(" spaced ,plain");

        assert_eq!(filter.rules(), &names(&[" spaced ", "plain"])[..]);
        // The padded rule only matches names that carry the padding.
        assert!(!filter.matches("wp_spaced_table"));
        assert!(filter.matches("plain_table"));
    }

    #[test]
    fn test_no_filters_match_scenario() {
        let filter = TableFilter::from_rules(names(&["swp_log"]));
        let partition = filter.classify(&names(&["posts", "postmeta"]));

        assert!(partition.filtered.is_empty());
        assert_eq!(partition.normal, names(&["posts", "postmeta"]));
    }

    #[test]
    fn test_all_filters_match_scenario() {
        let filter = TableFilter::from_rules(names(&["swp_log", "swp_index"]));
        let partition = filter.classify(&names(&["swp_log", "swp_index"]));

        assert_eq!(partition.filtered, names(&["swp_log", "swp_index"]));
        assert!(partition.normal.is_empty());
    }

    #[test]
    fn test_mixed_with_user_supplied_rule() {
        let mut filter = TableFilter::from_rules(names(&["redirection_logs"]));
        filter.extend_from_cli("custom_log");

        let partition = filter.classify(&names(&["posts", "redirection_logs", "custom_log"]));

        assert_eq!(partition.filtered, names(&["redirection_logs", "custom_log"]));
        assert_eq!(partition.normal, names(&["posts"]));
    }

    #[test]
    fn test_with_defaults_parses_and_dedups() {
        let filter = TableFilter::with_defaults().unwrap();

        assert!(!filter.is_empty());
        for expected in ["swp_log", "searchwp_index", "redirection_logs", "cerber_log"] {
            assert!(
                filter.rules().contains(&expected.to_string()),
                "default list should contain '{}'",
                expected
            );
        }

        let unique: HashSet<&String> = filter.rules().iter().collect();
        assert_eq!(unique.len(), filter.rules().len());
    }

    #[test]
    fn test_extend_from_file() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "tables_to_filter = [\"custom_log\", \"metrics\"]").unwrap();

        let mut filter = TableFilter::from_rules(names(&["swp_log"]));
        filter.extend_from_file(tmp.path()).unwrap();

        assert_eq!(
            filter.rules(),
            &names(&["swp_log", "custom_log", "metrics"])[..]
        );
    }

    #[test]
    fn test_extend_from_file_rejects_bad_toml() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "tables_to_filter = \"not-an-array\"").unwrap();

        let mut filter = TableFilter::empty();
        let result = filter.extend_from_file(tmp.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse filter file"));
    }
}
