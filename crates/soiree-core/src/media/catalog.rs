use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::item::{Item, ItemList};
use crate::{Error, Result};

const SAMPLE_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Independent page areas, each owning its own controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Testimonials,
    Gallery,
    Featured,
    Comparisons,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Testimonials,
        Section::Gallery,
        Section::Featured,
        Section::Comparisons,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Testimonials => "testimonials",
            Section::Gallery => "gallery",
            Section::Featured => "featured",
            Section::Comparisons => "comparisons",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

/// Before/after comparison entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeforeAfter {
    pub title: String,
    pub before: Item,
    pub after: Item,
}

/// Static content catalog supplied by the content layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub hero: ItemList,
    #[serde(default)]
    pub testimonials: ItemList,
    #[serde(default)]
    pub gallery: ItemList,
    #[serde(default)]
    pub featured: ItemList,
    #[serde(default)]
    pub comparisons: Vec<BeforeAfter>,
    /// Directory relative media references resolve against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Catalog {
    /// Parse a catalog from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file; media paths resolve relative to its directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut catalog = Self::from_json(&text)?;
        catalog.base_dir = path.parent().map(Path::to_path_buf);
        info!(
            "Loaded catalog {}: {} hero, {} testimonials, {} gallery, {} featured, {} comparisons",
            path.display(),
            catalog.hero.len(),
            catalog.testimonials.len(),
            catalog.gallery.len(),
            catalog.featured.len(),
            catalog.comparisons.len()
        );
        Ok(catalog)
    }

    /// Built-in sample catalog
    pub fn sample() -> Result<Self> {
        debug!("Using built-in sample catalog");
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Load from `path` when given, otherwise the sample catalog
    pub fn load_or_sample(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::sample(),
        }
    }

    /// Item list for a section; comparisons are flattened to their "after" side
    pub fn section(&self, section: Section) -> ItemList {
        match section {
            Section::Hero => self.hero.clone(),
            Section::Testimonials => self.testimonials.clone(),
            Section::Gallery => self.gallery.clone(),
            Section::Featured => self.featured.clone(),
            Section::Comparisons => self
                .comparisons
                .iter()
                .map(|pair| pair.after.clone().with_caption(pair.title.clone()))
                .collect(),
        }
    }

    /// Resolve an item's media reference to a filesystem path
    pub fn resolve_media(&self, item: &Item) -> PathBuf {
        let path = Path::new(&item.media_ref);
        match (&self.base_dir, path.is_relative()) {
            (Some(base), true) => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Item ids must be unique within a section so keys stay stable
    fn validate(&self) -> Result<()> {
        for section in Section::ALL {
            let items = self.section(section);
            for (i, item) in items.iter().enumerate() {
                if items.iter().skip(i + 1).any(|other| other.id == item.id) {
                    return Err(Error::Catalog(format!(
                        "duplicate id '{}' in section {}",
                        item.id, section
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_parses() {
        let catalog = Catalog::sample().unwrap();
        assert!(!catalog.hero.is_empty());
        assert!(catalog.testimonials.len() >= 3);
        assert!(catalog.gallery.len() >= 5);
        assert!(!catalog.comparisons.is_empty());
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("Gallery".parse::<Section>().unwrap(), Section::Gallery);
        assert!(matches!(
            "pricing".parse::<Section>(),
            Err(Error::UnknownSection(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_json(
            r#"{"gallery": [{"id": 1, "src": "a.jpg"}, {"id": "1", "src": "b.jpg"}]}"#,
        );
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_relative_media_resolves_against_catalog_dir() {
        let mut catalog = Catalog::from_json(r#"{"gallery": [{"id": 1, "src": "img/a.jpg"}]}"#)
            .unwrap();
        catalog.base_dir = Some(PathBuf::from("/srv/site"));
        let item = &catalog.gallery[0];
        assert_eq!(
            catalog.resolve_media(item),
            PathBuf::from("/srv/site/img/a.jpg")
        );
    }

    #[test]
    fn test_comparisons_flatten_with_titles() {
        let catalog = Catalog::sample().unwrap();
        let list = catalog.section(Section::Comparisons);
        assert_eq!(list.len(), catalog.comparisons.len());
        assert_eq!(list[0].title(), catalog.comparisons[0].title);
    }
}
