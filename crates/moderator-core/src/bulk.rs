// SPDX-License-Identifier: Apache-2.0

//! Bounded, order-preserving concurrent processing.
//!
//! Used to fetch several issues at once without overwhelming the GitHub API.
//! Results come back in input order whatever order the requests finish in,
//! so output for `moderate 1 2 3` always lists issue 1 first.

use std::fmt::Display;
use std::future::Future;

use anyhow::Result;
use futures::{StreamExt, stream};

/// Default number of items processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Processes `items` with at most `concurrency` in flight, preserving order.
///
/// A failure for one item never aborts the others; each item is paired with
/// its own result. `progress` is called as each item starts with
/// `(current, total, message)`.
///
/// # Example
///
/// ```rust
/// use moderator_core::bulk::process_ordered;
///
/// # async fn example() {
/// let results = process_ordered(
///     vec![1u64, 2, 3],
///     2,
///     |n| async move { Ok(n * 10) },
///     |_, _, _| {},
/// )
/// .await;
///
/// let values: Vec<u64> = results.into_iter().map(|(_, r)| r.unwrap()).collect();
/// assert_eq!(values, vec![10, 20, 30]);
/// # }
/// ```
pub async fn process_ordered<I, T, F, Fut, P>(
    items: Vec<I>,
    concurrency: usize,
    processor: F,
    progress: P,
) -> Vec<(I, Result<T>)>
where
    I: Clone + Display,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(usize, usize, &str),
{
    let total = items.len();
    let processor = &processor;
    let progress = &progress;

    stream::iter(items.into_iter().enumerate())
        .map(|(idx, item)| async move {
            progress(idx + 1, total, &format!("Processing {item}"));
            let result = processor(item.clone()).await;
            if let Err(e) = &result {
                tracing::warn!(item = %item, error = %e, "Item failed");
            }
            (item, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
