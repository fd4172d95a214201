//! Page slicing and pagination metadata

use crate::models::{PaginatedResponse, PaginationMeta};

/// Slice one page out of `items` and describe it
///
/// `page` is never clamped: asking past the last page yields an empty
/// `data` with metadata for the requested page.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32, base_url: &str) -> PaginatedResponse<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = items.len() as u64;
    let last_page = total.div_ceil(u64::from(per_page)) as u32;

    let start = (u64::from(page) - 1) * u64::from(per_page);
    let data: Vec<T> = items
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(per_page as usize)
        .collect();

    let page_url = |n: u32| format!("{}?page={}", base_url, n);
    let meta = PaginationMeta {
        total,
        per_page,
        current_page: page,
        last_page,
        first_page: 1,
        first_page_url: page_url(1),
        last_page_url: page_url(last_page),
        next_page_url: (page < last_page).then(|| page_url(page + 1)),
        previous_page_url: (page > 1).then(|| page_url(page - 1)),
    };

    PaginatedResponse { meta, data }
}
