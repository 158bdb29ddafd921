// Pagination helper for ARM Wizards
//
// ARM listing endpoints return results one page at a time, each page carrying
// an optional continuation link. This module flattens such a listing into a
// single in-memory sequence.

use std::future::Future;

use super::types::Page;

/// Follow a `nextLink` cursor until exhausted and collect every item.
///
/// Awaits `first`, then keeps requesting `next(link)` while the most recent
/// page carries a continuation link, preserving overall arrival order. Any
/// page error propagates immediately; partial results are discarded. An empty
/// first page with no link yields an empty `Vec`, not an error.
pub async fn list_all<T, E, F, Fut>(
    first: impl Future<Output = Result<Page<T>, E>>,
    mut next: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut page = first.await?;
    let mut all = Vec::with_capacity(page.value.len());

    loop {
        all.append(&mut page.value);
        match page.next_link.take() {
            Some(link) => page = next(link).await?,
            None => break,
        }
    }

    Ok(all)
}
