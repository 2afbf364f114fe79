//! Reference filter/sort/paginate evaluation.

use super::FetchRequest;
use super::Page;
use super::compare_rows;
use super::row_matches;
use crate::error::QueryError;
use crate::model::Row;

/// Evaluates a fetch request against an in-memory dataset.
///
/// Filters first, then sorts (stable), then slices the requested page. This
/// is the behavior every [`DataGateway`](crate::gateway::DataGateway) must
/// reproduce.
///
/// # Example
///
/// ```
/// use pingrid_lib::model::Row;
/// use pingrid_lib::query::{evaluate, FetchRequest, SortKey};
///
/// let rows: Vec<Row> = (0..25).map(|i| Row::new().set("n", i)).collect();
/// let request = FetchRequest::new(2, 10).with_sorting(vec![SortKey::desc("n")]);
///
/// let page = evaluate(&rows, &request).unwrap();
/// assert_eq!(page.len(), 5);
/// assert_eq!(page.page_count(), 3);
/// assert_eq!(page.rows()[0].value("n").to_string(), "4");
/// ```
pub fn evaluate(rows: &[Row], request: &FetchRequest) -> Result<Page, QueryError> {
    request.validate()?;

    let mut matched: Vec<&Row> = rows
        .iter()
        .filter(|row| row_matches(row, &request.column_filters))
        .collect();

    if !request.sorting.is_empty() {
        matched.sort_by(|a, b| compare_rows(a, b, &request.sorting));
    }

    let row_count = matched.len();
    let start = request.offset().min(row_count);
    let end = start.saturating_add(request.page_size).min(row_count);
    let page_rows = matched[start..end].iter().map(|row| (*row).clone()).collect();

    Ok(Page::new(page_rows, row_count, request.page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ColumnFilter;
    use crate::query::SortKey;

    fn abc() -> Vec<Row> {
        ["a", "b", "c"]
            .iter()
            .map(|id| Row::new().set("id", *id).set("name", *id))
            .collect()
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let request = FetchRequest::new(0, 10).with_filters(vec![ColumnFilter::new("name", "")]);
        let page = evaluate(&abc(), &request).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page.row_count(), 3);
        assert_eq!(page.page_count(), 1);
    }

    #[test]
    fn test_filter_applies_before_pagination() {
        let rows: Vec<Row> = (0..30)
            .map(|i| Row::new().set("n", i).set("parity", if i % 2 == 0 { "even" } else { "odd" }))
            .collect();
        let request = FetchRequest::new(1, 10).with_filters(vec![ColumnFilter::new("parity", "even")]);
        let page = evaluate(&rows, &request).unwrap();
        assert_eq!(page.row_count(), 15);
        assert_eq!(page.page_count(), 2);
        assert_eq!(page.len(), 5);
        assert_eq!(page.rows()[0].value("n").to_string(), "20");
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = evaluate(&abc(), &FetchRequest::new(5, 2)).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.row_count(), 3);
        assert_eq!(page.page_count(), 2);
    }

    #[test]
    fn test_sort_then_slice() {
        let request = FetchRequest::new(0, 2).with_sorting(vec![SortKey::desc("name")]);
        let page = evaluate(&abc(), &request).unwrap();
        let ids: Vec<String> = page.rows().iter().map(|r| r.value("id").to_string()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_invalid_page_size() {
        assert_eq!(
            evaluate(&abc(), &FetchRequest::new(0, 0)),
            Err(QueryError::InvalidPageSize(0))
        );
    }
}
