extern crate futures;

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Runs `f` over `items` with at most `limit` futures in flight. Results keep
/// the order of `items`.
pub async fn async_pool<I, F, Fut>(limit: usize, items: I, f: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    stream::iter(items).map(f).buffered(limit.max(1)).collect().await
}
