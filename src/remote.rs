//! Remote Collections
//!
//! Every page holds the same shape of state: a server-fetched collection, a
//! loading flag, and a "selected row" pointer. This module owns that shape
//! once instead of re-deriving it per page, and bakes in the two guarantees
//! the pages need:
//!
//! * latest-wins fetches - a fast second selection must not be overwritten by
//!   a slower first response resolving late
//! * selection hygiene - after a refetch, a selected id that is no longer in
//!   the collection is cleared

use std::fmt::Display;
use std::future::Future;

use leptos::prelude::*;

/// Monotonic token issuer for one fetch slot. A response is applied only when
/// its token is still the latest one issued.
#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.issued
    }
}

/// Reactive handle to a [`RequestSequence`], shared by the overlapping
/// fetches of one selection slot.
#[derive(Clone, Copy)]
pub struct FetchSlot(StoredValue<RequestSequence>);

impl FetchSlot {
    pub fn new() -> Self {
        Self(StoredValue::new(RequestSequence::default()))
    }

    pub fn begin(&self) -> u64 {
        self.0.update_value(|seq| {
            seq.begin();
        });
        self.0.with_value(|seq| seq.issued)
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.with_value(|seq| seq.is_current(token))
    }
}

impl Default for FetchSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep a selection only while its id is present in the freshly fetched
/// collection.
pub fn reconcile_selection<K, T>(
    selected: Option<K>,
    items: &[T],
    key: impl Fn(&T) -> &K,
) -> Option<K>
where
    K: PartialEq,
{
    selected.filter(|id| items.iter().any(|item| key(item) == id))
}

/// A server-fetched collection with loading state and a latest-wins guard.
pub struct RemoteCollection<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    slot: FetchSlot,
}

// Derived Clone/Copy would demand `T: Clone`/`T: Copy`, but the handle is
// just a pair of signal ids plus a slot and copies regardless of `T`.
impl<T: Send + Sync + 'static> Clone for RemoteCollection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for RemoteCollection<T> {}

impl<T: Clone + Send + Sync + 'static> RemoteCollection<T> {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            slot: FetchSlot::new(),
        }
    }

    /// Run a fetch and apply its result unless a newer fetch started in the
    /// meantime. Fetch failures log to the console and leave an empty
    /// collection rather than erroring the page.
    pub async fn load<F, E>(&self, fetch: F)
    where
        F: Future<Output = Result<Vec<T>, E>>,
        E: Display,
    {
        let token = self.slot.begin();
        let result = fetch.await;
        if !self.slot.is_current(token) {
            return;
        }
        match result {
            Ok(items) => self.items.set(items),
            Err(err) => {
                web_sys::console::error_1(&format!("fetch failed: {err}").into());
                self.items.set(Vec::new());
            }
        }
        self.loading.set(false);
    }
}

impl<T: Clone + Send + Sync + 'static> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_fetch_invalidates_earlier_token() {
        let mut seq = RequestSequence::default();
        let first = seq.begin();
        let second = seq.begin();
        // Slow first response arrives after the second fetch started.
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn tokens_stay_current_until_superseded() {
        let mut seq = RequestSequence::default();
        let t = seq.begin();
        assert!(seq.is_current(t));
    }

    #[test]
    fn slot_tokens_supersede_in_order() {
        let slot = FetchSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(second > first);
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn collection_handle_copies_without_cloning_items() {
        struct Row(#[allow(dead_code)] String);
        fn assert_copy<C: Copy>() {}
        assert_copy::<RemoteCollection<Row>>();
    }

    #[test]
    fn selection_cleared_when_id_disappears() {
        let items = vec!["a".to_string(), "b".to_string()];
        let kept = reconcile_selection(Some("a".to_string()), &items, |s| s);
        assert_eq!(kept, Some("a".to_string()));

        let refetched = vec!["b".to_string()];
        let cleared = reconcile_selection(Some("a".to_string()), &refetched, |s| s);
        assert_eq!(cleared, None);
    }

    #[test]
    fn empty_selection_survives_reconcile() {
        let items = vec!["a".to_string()];
        assert_eq!(reconcile_selection::<String, _>(None, &items, |s| s), None);
    }
}
