/// Slice out one 1-based page. Purely a presentation concern; the caller
/// decides ordering and any upper bound beforehand.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    items.into_iter().skip(start).take(per_page).collect()
}
