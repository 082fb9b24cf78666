use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Category label that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// A displayable unit: slide, testimonial, gallery image or one side of a
/// before/after pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable key (numeric ids in the catalog are accepted and stringified)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Image/video locator
    #[serde(alias = "mediaRef", alias = "src", alias = "image")]
    pub media_ref: String,
    #[serde(default, alias = "title")]
    pub caption: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Free-form fields (rating, venue, guests, description, ...)
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    /// Extra photos of the same event, browsed in the event viewer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, media_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_ref: media_ref.into(),
            caption: None,
            category: None,
            tags: BTreeSet::new(),
            date: None,
            metadata: BTreeMap::new(),
            gallery: Vec::new(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_gallery_image(mut self, media_ref: impl Into<String>) -> Self {
        self.gallery.push(media_ref.into());
        self
    }

    /// The event's photos as viewer entries; the main media when there are none
    pub fn gallery_items(&self) -> ItemList {
        let refs: Vec<&str> = if self.gallery.is_empty() {
            vec![self.media_ref.as_str()]
        } else {
            self.gallery.iter().map(String::as_str).collect()
        };
        refs.into_iter()
            .enumerate()
            .map(|(k, media_ref)| {
                Item::new(format!("{}-{}", self.id, k + 1), media_ref)
                    .with_caption(format!("{} {}", self.title(), k + 1))
            })
            .collect()
    }

    /// String entries of the `metadata.highlights` array
    pub fn highlights(&self) -> Vec<&str> {
        self.metadata
            .get("highlights")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Caption if present, otherwise the id
    pub fn title(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.id)
    }

    /// String metadata value
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Star rating (1-5) stored under `metadata.rating`
    pub fn rating(&self) -> Option<u8> {
        self.metadata
            .get("rating")
            .and_then(Value::as_u64)
            .map(|r| r.min(5) as u8)
    }

    /// Whether this item passes the given filter
    pub fn matches(&self, filter: &ItemFilter) -> bool {
        if let Some(category) = filter.category() {
            if self.category.as_deref() != Some(category) {
                return false;
            }
        }

        let needle = filter.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let contains = |text: &str| text.to_lowercase().contains(&needle);
        self.caption.as_deref().is_some_and(contains)
            || contains(&self.id)
            || self.metadata_str("description").is_some_and(contains)
            || self.tags.iter().any(|tag| contains(tag.as_str()))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Category + free-text filter applied to an item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// `None` or "All" keeps every category
    pub category: Option<String>,
    /// Case-insensitive substring over caption, id, description and tags
    pub search: String,
}

impl ItemFilter {
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    pub fn is_empty(&self) -> bool {
        self.category().is_none() && self.search.trim().is_empty()
    }
}

/// Ordered, immutable sequence of items shared read-only with controllers.
///
/// Cloning is cheap; filtering produces a new list and never touches the
/// original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct ItemList {
    items: Arc<[Item]>,
}

impl ItemList {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// The list concatenated with itself, each entry tagged with its copy
    /// number (0 or 1) so keys stay unique across the seam.
    pub fn doubled(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
        (0..2).flat_map(move |copy| self.items.iter().map(move |item| (copy, item)))
    }

    /// New list holding only the matching items, in original order
    pub fn filter(&self, filter: &ItemFilter) -> ItemList {
        if filter.is_empty() {
            return self.clone();
        }
        self.items
            .iter()
            .filter(|item| item.matches(filter))
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    /// "All" followed by every distinct category in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for category in self.items.iter().filter_map(|item| item.category.as_ref()) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        categories
    }

}

impl Default for ItemList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Item>> for ItemList {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl From<ItemList> for Vec<Item> {
    fn from(list: ItemList) -> Self {
        list.items.to_vec()
    }
}

impl FromIterator<Item> for ItemList {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for ItemList {
    type Output = Item;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
