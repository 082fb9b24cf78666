use std::path::Path;

use anyhow::Result;

use soiree_core::media::{Catalog, Item, ItemFilter, Section};

pub fn run(
    catalog_path: Option<&Path>,
    section: Option<&str>,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let catalog = Catalog::load_or_sample(catalog_path)?;
    let sections = match section {
        Some(name) => vec![name.parse::<Section>()?],
        None => Section::ALL.to_vec(),
    };
    let filter = ItemFilter {
        category,
        search: search.unwrap_or_default(),
    };

    if json {
        let listing: serde_json::Map<String, serde_json::Value> = sections
            .iter()
            .map(|section| -> Result<(String, serde_json::Value)> {
                let items = catalog.section(*section).filter(&filter);
                let items: Vec<&Item> = items.iter().collect();
                Ok((section.name().to_string(), serde_json::to_value(items)?))
            })
            .collect::<Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for section in sections {
        let items = catalog.section(section).filter(&filter);
        println!("{} ({}):", section, items.len());
        if items.is_empty() {
            println!("  (no items)");
        }
        for (k, item) in items.iter().enumerate() {
            println!("  [{}] {}", k, describe(item));
            println!("      {}", item.media_ref);
        }
        println!();
    }

    Ok(())
}

/// One-line summary: title, category, date, rating
fn describe(item: &Item) -> String {
    let mut parts = vec![item.title().to_string()];
    if let Some(category) = &item.category {
        parts.push(category.clone());
    }
    if let Some(date) = item.date {
        parts.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(rating) = item.rating() {
        parts.push(format!("{}/5", rating));
    }
    parts.join(" - ")
}
