use serde::Serialize;

fn effective_size(size: usize) -> usize {
    size.max(1)
}

/// Number of pages needed to show `len` items, zero for an empty list.
pub fn page_count(len: usize, size: usize) -> usize {
    len.div_ceil(effective_size(size))
}

/// 1-based page that holds the item at `index`.
pub fn page_of_index(index: usize, size: usize) -> usize {
    index / effective_size(size) + 1
}

/// Clamps a requested page into `1..=total_pages` (page 1 for empty lists).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Items shown on a 1-based `page`. Out of range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let size = effective_size(size);
    let start = page.saturating_sub(1).saturating_mul(size);
    if page == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T: Clone> Page<T> {
    pub fn of(items: &[T], page: usize, size: usize) -> Self {
        let total_pages = page_count(items.len(), size);
        let page = clamp_page(page, total_pages);
        Page {
            items: paginate(items, page, size).to_vec(),
            page,
            total_pages,
            total: items.len(),
        }
    }
}
