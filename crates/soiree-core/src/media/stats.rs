use super::item::ItemList;

/// Summary shown above the testimonial ticker
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TestimonialStats {
    pub count: usize,
    /// Mean rating rounded to one decimal
    pub average_rating: f64,
    pub five_star: usize,
    /// Share of 5-star reviews, rounded to a whole percent
    pub satisfaction_percent: u32,
}

impl TestimonialStats {
    /// Compute statistics; unrated items count as zero stars
    pub fn from_items(items: &ItemList) -> Self {
        let count = items.len();
        if count == 0 {
            return Self::default();
        }

        let total: u32 = items
            .iter()
            .map(|item| u32::from(item.rating().unwrap_or(0)))
            .sum();
        let five_star = items.iter().filter(|item| item.rating() == Some(5)).count();

        let average = f64::from(total) / count as f64;
        Self {
            count,
            average_rating: (average * 10.0).round() / 10.0,
            five_star,
            satisfaction_percent: ((five_star as f64 / count as f64) * 100.0).round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Item;

    #[test]
    fn test_empty_list_is_all_zero() {
        let stats = TestimonialStats::from_items(&ItemList::default());
        assert_eq!(stats, TestimonialStats::default());
    }

    #[test]
    fn test_stats() {
        let items: ItemList = [5, 4, 5]
            .iter()
            .enumerate()
            .map(|(i, r)| Item::new(i.to_string(), "x.jpg").with_metadata("rating", *r))
            .collect();
        let stats = TestimonialStats::from_items(&items);
        assert_eq!(stats.count, 3);
        assert!((stats.average_rating - 4.7).abs() < 1e-9);
        assert_eq!(stats.five_star, 2);
        assert_eq!(stats.satisfaction_percent, 67);
    }
}
