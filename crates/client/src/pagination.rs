//! Multi-page aggregation
//!
//! List endpoints answer with an `{"items": [...], "has_more": bool}`
//! envelope and accept a `page` query parameter. The walker either fetches
//! one explicit page or aggregates all of them: pages are requested
//! strictly in increasing order starting at 1, items are appended in
//! server order with no deduplication, and the loop stops on
//! `has_more == false` or an empty page. Any error propagates immediately
//! and discards what was collected — pagination has no partial-success
//! contract.

use std::future::Future;

use kaalition_domain::{hydrate_seq, Hydrate, KaalitionError, Result};
use serde_json::Value;

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items in server-returned order.
    pub items: Vec<T>,
    /// Whether the server reports further pages.
    pub has_more: bool,
}

impl<T: Hydrate> Page<T> {
    /// Parse a listing response. A bare array (as the public catalogs
    /// return) counts as a single, complete page.
    ///
    /// # Errors
    /// Propagates item hydration failures; a non-array, non-object
    /// response is a hydration error.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(_) => Ok(Self {
                items: hydrate_seq(value)?,
                has_more: false,
            }),
            Value::Object(_) => {
                let items = match value.get("items") {
                    Some(items) => hydrate_seq(items)?,
                    None => Vec::new(),
                };
                let has_more = value
                    .get("has_more")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                Ok(Self { items, has_more })
            }
            _ => Err(KaalitionError::Hydration {
                entity: T::ENTITY,
                detail: "listing response is neither an array nor an object".to_owned(),
            }),
        }
    }
}

/// Per-call pagination choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pages {
    /// Aggregate every page, starting at page 1.
    #[default]
    All,
    /// Fetch exactly this page and stop.
    Only(u32),
}

/// Walk a paged endpoint according to `pages`.
///
/// `fetch_page` is invoked with 1-based page numbers; for `Pages::Only`
/// it is invoked exactly once.
///
/// # Errors
/// The first fetch error is returned as-is; already-collected items are
/// discarded.
pub async fn collect<T, F, Fut>(pages: Pages, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    match pages {
        Pages::Only(page) => Ok(fetch_page(page).await?.items),
        Pages::All => {
            let mut all = Vec::new();
            let mut page = 1;
            loop {
                let fetched = fetch_page(page).await?;
                if fetched.items.is_empty() {
                    break;
                }
                all.extend(fetched.items);
                if !fetched.has_more {
                    break;
                }
                page += 1;
            }
            Ok(all)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use kaalition_domain::User;

    fn user_page(ids: std::ops::Range<i64>, has_more: bool) -> Result<Page<User>> {
        Page::from_value(&json!({
            "items": ids.map(|id| json!({"id": id})).collect::<Vec<_>>(),
            "has_more": has_more,
        }))
    }

    #[tokio::test]
    async fn collect_all_aggregates_pages_in_order() {
        let calls = RefCell::new(Vec::new());
        let users: Vec<User> = collect(Pages::All, |page| {
            calls.borrow_mut().push(page);
            let start = i64::from(page - 1) * 10;
            async move { user_page(start..start + 10, page < 3) }
        })
        .await
        .unwrap();

        assert_eq!(users.len(), 30);
        assert_eq!(calls.into_inner(), vec![1, 2, 3]);
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, (0..30).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn explicit_page_fetches_exactly_once() {
        let calls = RefCell::new(Vec::new());
        let users: Vec<User> = collect(Pages::Only(2), |page| {
            calls.borrow_mut().push(page);
            async move { user_page(10..20, true) }
        })
        .await
        .unwrap();

        assert_eq!(users.len(), 10);
        assert_eq!(users[0].id, 10);
        // Page 3 is never requested even though has_more was true.
        assert_eq!(calls.into_inner(), vec![2]);
    }

    #[tokio::test]
    async fn empty_page_terminates_the_walk() {
        let calls = RefCell::new(0_u32);
        let users: Vec<User> = collect(Pages::All, |page| {
            *calls.borrow_mut() += 1;
            async move {
                if page == 1 {
                    user_page(0..10, true)
                } else {
                    user_page(0..0, true)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(users.len(), 10);
        assert_eq!(calls.into_inner(), 2);
    }

    #[test]
    fn fetch_error_discards_partial_results() {
        let result: Result<Vec<User>> = tokio_test::block_on(collect(Pages::All, |page| {
            async move {
                if page == 1 {
                    user_page(0..10, true)
                } else {
                    Err(KaalitionError::Server {
                        status: 500,
                        message: "boom".into(),
                    })
                }
            }
        }));

        assert!(matches!(result, Err(KaalitionError::Server { .. })));
    }

    #[test]
    fn bare_array_is_a_single_complete_page() {
        let page: Page<User> = Page::from_value(&json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_more);
    }

    #[test]
    fn envelope_without_flag_defaults_to_no_more_pages() {
        let page: Page<User> = Page::from_value(&json!({"items": [{"id": 1}]})).unwrap();
        assert!(!page.has_more);
    }
}
