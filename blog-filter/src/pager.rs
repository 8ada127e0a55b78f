use crate::models::PageResult;

/// 每页显示的文章数
pub const PAGE_SIZE: usize = 5;

/// 总页数，无结果时为 0
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// 切出指定页的条目
///
/// 页码从 1 开始。页码为 0 或超出总页数时返回空页，不做修正；
/// 修正页码由调用方通过 [`clamp_page`] 完成。
pub fn compute_page<T: Clone>(filtered: &[T], page_size: usize, current_page: usize) -> PageResult<T> {
    let page_size = page_size.max(1);
    let page_count = page_count(filtered.len(), page_size);

    let visible = match current_page.checked_sub(1) {
        Some(index) if current_page <= page_count => {
            let start = index * page_size;
            let end = (start + page_size).min(filtered.len());
            filtered[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    PageResult { visible, page_count }
}

/// 将页码限制在 `[1, max(page_count, 1)]`
pub fn clamp_page(page: i64, page_count: usize) -> usize {
    let last = page_count.max(1);
    if page < 1 {
        1
    } else {
        usize::try_from(page).map_or(last, |p| p.min(last))
    }
}

/// 上一页，已在第一页时不变
pub fn previous_page(page: usize, page_count: usize) -> usize {
    clamp_page(as_signed(page).saturating_sub(1), page_count)
}

/// 下一页，已在最后一页时不变
pub fn next_page(page: usize, page_count: usize) -> usize {
    clamp_page(as_signed(page).saturating_add(1), page_count)
}

fn as_signed(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn twelve_items_make_three_pages() {
        let filtered = items(12);
        assert_eq!(compute_page(&filtered, 5, 1).page_count, 3);
        assert_eq!(compute_page(&filtered, 5, 1).visible, vec![0, 1, 2, 3, 4]);
        assert_eq!(compute_page(&filtered, 5, 2).visible, vec![5, 6, 7, 8, 9]);
        assert_eq!(compute_page(&filtered, 5, 3).visible, vec![10, 11]);
        assert!(compute_page(&filtered, 5, 4).visible.is_empty());
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let page = compute_page::<usize>(&[], PAGE_SIZE, 1);
        assert_eq!(page.page_count, 0);
        assert!(page.visible.is_empty());
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(page_count(10, 5), 2);
        assert_eq!(page_count(11, 5), 3);
        assert_eq!(page_count(1, 5), 1);
    }

    #[test]
    fn page_zero_and_zero_size() {
        let filtered = items(3);
        assert!(compute_page(&filtered, 5, 0).visible.is_empty());
        let page = compute_page(&filtered, 0, 2);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.visible, vec![1]);
    }

    #[test]
    fn clamp_stays_in_range() {
        for page_count in [0usize, 1, 3, 10] {
            let last = page_count.max(1);
            for page in [-100i64, -1, 0, 1, 2, 3, 9, 10, 11, 1_000, i64::MAX] {
                let clamped = clamp_page(page, page_count);
                assert!((1..=last).contains(&clamped), "{} -> {}", page, clamped);
            }
        }
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(-4, 3), 1);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn navigation_is_noop_at_boundaries() {
        assert_eq!(previous_page(1, 3), 1);
        assert_eq!(previous_page(2, 3), 1);
        assert_eq!(next_page(3, 3), 3);
        assert_eq!(next_page(2, 3), 3);
        assert_eq!(next_page(1, 0), 1);
        assert_eq!(previous_page(1, 0), 1);
    }

    #[test]
    fn navigation_recovers_out_of_range_pages() {
        assert_eq!(next_page(9, 3), 3);
        assert_eq!(previous_page(9, 3), 3);
        assert_eq!(previous_page(0, 3), 1);
        assert_eq!(next_page(0, 3), 1);
    }
}
