use std::path::Path;

use anyhow::Result;

use soiree_core::media::{Catalog, TestimonialStats};

pub fn run(catalog_path: Option<&Path>) -> Result<()> {
    let catalog = Catalog::load_or_sample(catalog_path)?;
    let stats = TestimonialStats::from_items(&catalog.testimonials);

    if stats.count == 0 {
        println!("No testimonials in the catalog.");
        return Ok(());
    }

    println!("Testimonials:     {}", stats.count);
    println!("Average rating:   {:.1} / 5", stats.average_rating);
    println!("5-star reviews:   {}", stats.five_star);
    println!("Satisfaction:     {}%", stats.satisfaction_percent);

    Ok(())
}
