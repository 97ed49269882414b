//! Category aggregation for the filter bar.

/// The synthetic category selecting the unfiltered feed.
pub const ALL_CATEGORY: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

/// Order category counts most-popular first.
///
/// The sort is stable, so entries with equal counts keep the order the
/// source emitted them in.
pub fn order_by_count(counts: &[CategoryCount]) -> Vec<&CategoryCount> {
    let mut ordered: Vec<&CategoryCount> = counts.iter().collect();
    ordered.sort_by(|left, right| right.count.cmp(&left.count));
    ordered
}

/// The ordered category-name list shown in the filter bar: [`ALL_CATEGORY`]
/// first, then every counted category by descending popularity. Always
/// returns a fresh sequence; empty input yields `["ALL"]`.
pub fn aggregate(counts: &[CategoryCount]) -> Vec<String> {
    let mut names = Vec::with_capacity(counts.len() + 1);
    names.push(ALL_CATEGORY.to_string());
    names.extend(
        order_by_count(counts)
            .into_iter()
            .map(|entry| entry.name.clone()),
    );
    names
}
