//! Read-only registry of the site's navigable content.
//!
//! The catalog is loaded once (built-in fixtures or an operator-supplied TOML
//! file) and never mutated afterwards; pages borrow records out of it.

pub mod types;

pub use types::{
    Department, FacultyMember, NewsCategory, NewsItem, Program, Publication, StatIcon, StatItem,
    join_publications,
};

use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_FIXTURES: &str = include_str!("fixtures.toml");

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    departments: Vec<Department>,
    #[serde(default)]
    news: Vec<NewsItem>,
    #[serde(default)]
    stats: Vec<StatItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    departments: Vec<Department>,
    news: Vec<NewsItem>,
    stats: Vec<StatItem>,
}

impl ContentCatalog {
    /// The content shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_FIXTURES)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(contents).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut seen = HashSet::new();
        for dept in &file.departments {
            if !seen.insert(dept.id.as_str()) {
                return Err(CatalogError::DuplicateId(dept.id.clone()));
            }
        }

        tracing::debug!(
            departments = file.departments.len(),
            news = file.news.len(),
            stats = file.stats.len(),
            "catalog loaded"
        );

        Ok(Self {
            departments: file.departments,
            news: file.news,
            stats: file.stats,
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Built-in fixtures unless `path` names a replacement catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_toml_file(path),
            None => Self::builtin(),
        }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    pub fn stats(&self) -> &[StatItem] {
        &self.stats
    }

    /// Departments whose name or faculty contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Department> {
        let query = query.trim();
        self.departments.iter().filter(|d| d.matches(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_fixtures_parse() {
        let catalog = ContentCatalog::builtin().unwrap();
        assert_eq!(catalog.departments().len(), 4);
        assert_eq!(catalog.news().len(), 3);
        assert_eq!(catalog.stats().len(), 4);
        assert_eq!(catalog.stats()[3].icon, StatIcon::Building2);
        assert_eq!(catalog.news()[1].category, NewsCategory::Event);
    }

    #[test]
    fn department_lookup_by_id() {
        let catalog = ContentCatalog::builtin().unwrap();
        let dept = catalog.department("2").unwrap();
        assert_eq!(dept.name, "Medical Sciences");
        assert_eq!(dept.programs_offered.len(), 3);
        assert!(catalog.department("99").is_none());
    }

    #[test]
    fn builtin_has_a_member_without_bio() {
        let catalog = ContentCatalog::builtin().unwrap();
        let cs = catalog.department("1").unwrap();
        let member = cs.faculty_member("Dr. Usman Ghani").unwrap();
        assert!(member.fixture_bio().is_none());
        assert!(matches!(member.publications[0], Publication::Plain(_)));
        assert!(member.avatar_url().starts_with("https://ui-avatars.com/api/"));
    }

    #[test]
    fn search_matches_name_or_faculty() {
        let catalog = ContentCatalog::builtin().unwrap();
        let names: Vec<_> = catalog
            .search("faculty of m")
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Medical Sciences", "Management Sciences"]);

        assert_eq!(catalog.search("SCIENCE").len(), 4);
        assert_eq!(catalog.search("  ").len(), 4);
        assert!(catalog.search("astronomy").is_empty());
    }

    #[test]
    fn duplicate_department_ids_are_rejected() {
        let err = ContentCatalog::from_toml_str(
            r#"
[[departments]]
id = "1"
name = "A"
faculty = "F"
image = "a.png"

[[departments]]
id = "1"
name = "B"
faculty = "F"
image = "b.png"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn malformed_catalog_reports_parse_error() {
        let err = ContentCatalog::from_toml_str("[[departments]]\nid = 1").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn load_prefers_explicit_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
[[departments]]
id = "x"
name = "Pharmacy"
faculty = "Faculty of Pharmacy"
image = "p.png"
"#,
        )
        .unwrap();

        let catalog = ContentCatalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.departments().len(), 1);
        assert!(catalog.news().is_empty());
        assert_eq!(ContentCatalog::load(None).unwrap().departments().len(), 4);
    }
}
