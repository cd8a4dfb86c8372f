//! The cart aggregate and its store.
//!
//! `CartStore` is the sole writer of cart state: views receive derived
//! values (entries, count, subtotal) and route every mutation through the
//! operations here. After each mutation the full cart is projected to the
//! durable key-value slot and subscribers are notified, so a presentation
//! layer can re-read derived state without polling.
//!
//! Entries are unique by product id - adding an already-present product
//! increments its quantity instead of appending - and every entry holds a
//! quantity of at least 1; decrementing to zero removes the entry.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use techstore_core::{Price, Product, ProductId};

use crate::persist::KeyValueSlot;

/// Default delay before the sidebar opens after an add-to-cart.
const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(300);

/// One (product, quantity) pair in the cart.
///
/// The product is a full denormalized snapshot taken at insertion time, not
/// a live catalog reference. Serializes flat (`{..product fields.., quantity}`)
/// for wire compatibility with previously persisted carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product snapshot at time of insertion.
    #[serde(flatten)]
    pub product: Product,
    /// Always >= 1; an entry that would reach 0 is removed instead.
    pub quantity: u32,
}

impl CartEntry {
    /// `price * quantity` for this entry.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&[CartEntry])>;

/// The mutable cart aggregate.
///
/// Single-writer: construct one store per session and pass it (not clones
/// of its state) to whatever renders it. All operations run to completion
/// on the calling thread; there is no interior locking.
pub struct CartStore {
    entries: Vec<CartEntry>,
    sidebar_open: bool,
    /// Deadlines of in-flight add-to-cart feedback timers. Each add pushes
    /// its own deadline; timers are independent and never coalesced.
    pending_opens: Vec<Instant>,
    feedback_delay: Duration,
    slot: Box<dyn KeyValueSlot>,
    storage_key: String,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber_id: u64,
}

impl CartStore {
    /// Create a store hydrated from whatever the slot holds under `key`.
    ///
    /// Absent or unparsable persisted state means "no prior cart": the
    /// store starts empty and the problem is logged, never surfaced.
    pub fn restore(slot: Box<dyn KeyValueSlot>, key: impl Into<String>) -> Self {
        let storage_key = key.into();
        let entries = match slot.read(&storage_key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<CartEntry>>(&json) {
                Ok(entries) => {
                    let restored: Vec<CartEntry> = entries
                        .into_iter()
                        .filter(|entry| entry.quantity >= 1)
                        .collect();
                    tracing::debug!(entries = restored.len(), "Restored persisted cart");
                    restored
                }
                Err(e) => {
                    tracing::warn!(error = %e, key = %storage_key, "Ignoring unparsable persisted cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, key = %storage_key, "Failed to read persisted cart");
                Vec::new()
            }
        };

        Self {
            entries,
            sidebar_open: false,
            pending_opens: Vec::new(),
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            slot,
            storage_key,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    /// Override the add-to-cart feedback delay.
    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`: increments the existing entry's quantity,
    /// or appends a new quantity-1 entry holding a snapshot of the product.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(entry) = self.entry_mut(&product.id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry {
                product: product.clone(),
                quantity: 1,
            });
        }
        self.after_mutation();
    }

    /// Add one unit and schedule the sidebar to open after the feedback
    /// delay. Each call arms its own timer; see [`Self::poll_feedback`].
    pub fn add_to_cart_with_feedback(&mut self, product: &Product, now: Instant) {
        self.add_to_cart(product);
        self.pending_opens.push(now + self.feedback_delay);
    }

    /// Remove the entry for `id` entirely. No-op if absent.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.product.id != id);
        if self.entries.len() != before {
            self.after_mutation();
        }
    }

    /// Set the entry's quantity to exactly `quantity`; 0 removes the entry.
    /// No-op if the entry is absent.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(id);
            return;
        }
        if let Some(entry) = self.entry_mut(id) {
            entry.quantity = quantity;
            self.after_mutation();
        }
    }

    /// Increment the entry's quantity by 1. No-op if absent.
    pub fn increase_quantity(&mut self, id: &ProductId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.quantity += 1;
            self.after_mutation();
        }
    }

    /// Decrement the entry's quantity by 1; a quantity-1 entry is removed
    /// instead, so no zero-quantity entry ever exists.
    pub fn decrease_quantity(&mut self, id: &ProductId) {
        let Some(entry) = self.entry_mut(id) else {
            return;
        };
        if entry.quantity == 1 {
            self.entries.retain(|entry| &entry.product.id != id);
        } else {
            entry.quantity -= 1;
        }
        self.after_mutation();
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.after_mutation();
    }

    // =========================================================================
    // Derived reads
    // =========================================================================

    /// Current entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Sum of all entry quantities; 0 for an empty cart.
    #[must_use]
    pub fn items_count(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }

    /// Sum of `price * quantity` over all entries; zero for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Whether an entry exists for `id`.
    #[must_use]
    pub fn is_in_cart(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.product.id == id)
    }

    /// Quantity of the entry for `id`, or 0 if absent.
    #[must_use]
    pub fn product_quantity(&self, id: &ProductId) -> u32 {
        self.entries
            .iter()
            .find(|entry| &entry.product.id == id)
            .map_or(0, |entry| entry.quantity)
    }

    // =========================================================================
    // Sidebar visibility (UI affordance, not cart state)
    // =========================================================================

    /// Flip the sidebar visibility flag.
    pub fn toggle_cart(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Show the sidebar.
    pub fn open_cart(&mut self) {
        self.sidebar_open = true;
    }

    /// Hide the sidebar.
    pub fn close_cart(&mut self) {
        self.sidebar_open = false;
    }

    /// Whether the sidebar is currently visible.
    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.sidebar_open
    }

    /// Fire feedback timers whose deadline has passed, opening the sidebar.
    /// Returns how many timers fired. Call this from the UI tick; timers
    /// have no cancellation semantics.
    pub fn poll_feedback(&mut self, now: Instant) -> usize {
        let before = self.pending_opens.len();
        self.pending_opens.retain(|deadline| *deadline > now);
        let fired = before - self.pending_opens.len();
        if fired > 0 {
            self.open_cart();
        }
        fired
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback invoked with the entry slice after every cart
    /// mutation. Sidebar visibility changes do not notify.
    pub fn subscribe(&mut self, callback: impl Fn(&[CartEntry]) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn entry_mut(&mut self, id: &ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| &entry.product.id == id)
    }

    /// Persist and notify, in that order. Runs after every mutation.
    fn after_mutation(&mut self) {
        self.persist();
        self.notify();
    }

    /// Project the current cart into the slot. Fire-and-forget: a failed
    /// write is logged and not surfaced to the caller.
    fn persist(&mut self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = self.slot.write(&self.storage_key, &json) {
                    tracing::warn!(error = %e, key = %self.storage_key, "Failed to persist cart");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
            }
        }
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.entries);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::persist::{MemorySlot, SlotError};

    const KEY: &str = "techstore-cart";

    /// Slot handle that stays inspectable after being moved into the store.
    #[derive(Clone, Default)]
    struct SharedSlot(Rc<RefCell<MemorySlot>>);

    impl KeyValueSlot for SharedSlot {
        fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
            self.0.borrow().read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
            self.0.borrow_mut().write(key, value)
        }
    }

    fn empty_store() -> CartStore {
        CartStore::restore(Box::new(MemorySlot::new()), KEY)
    }

    fn product(id: &str) -> Product {
        Catalog::demo()
            .by_id(&ProductId::new(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_add_twice_merges_into_one_entry() {
        // Scenario A: two adds of the 2499 product.
        let mut store = empty_store();
        let macbook = product("1");

        store.add_to_cart(&macbook);
        store.add_to_cart(&macbook);

        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries().first().unwrap().quantity, 2);
        assert_eq!(store.items_count(), 2);
        assert_eq!(store.subtotal(), Price::from_major_units(4998));
    }

    #[test]
    fn test_entries_unique_by_id_across_interleaved_adds() {
        let mut store = empty_store();
        for id in ["1", "5", "1", "5", "1"] {
            store.add_to_cart(&product(id));
        }

        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.product_quantity(&ProductId::new("1")), 3);
        assert_eq!(store.product_quantity(&ProductId::new("5")), 2);
        assert!(store.entries().iter().all(|e| e.quantity >= 1));
    }

    #[test]
    fn test_empty_cart_derived_values() {
        let store = empty_store();
        assert_eq!(store.items_count(), 0);
        assert_eq!(store.subtotal(), Price::ZERO);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_decrease_quantity_one_removes_entry() {
        // Scenario B: quantity-1 entry disappears entirely.
        let mut store = empty_store();
        let headphones = product("5");
        store.add_to_cart(&headphones);

        store.decrease_quantity(&headphones.id);

        assert!(!store.is_in_cart(&headphones.id));
        assert_eq!(store.product_quantity(&headphones.id), 0);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_decrease_quantity_above_one_decrements() {
        let mut store = empty_store();
        let phone = product("3");
        store.add_to_cart(&phone);
        store.add_to_cart(&phone);
        store.add_to_cart(&phone);

        store.decrease_quantity(&phone.id);
        assert_eq!(store.product_quantity(&phone.id), 2);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let mut store = empty_store();
        let mouse = product("8");
        store.add_to_cart(&mouse);

        store.update_quantity(&mouse.id, 7);
        assert_eq!(store.product_quantity(&mouse.id), 7);
        assert_eq!(store.subtotal(), Price::from_major_units(693));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut store = empty_store();
        let mouse = product("8");
        store.add_to_cart(&mouse);

        store.update_quantity(&mouse.id, 0);
        assert!(!store.is_in_cart(&mouse.id));
    }

    #[test]
    fn test_mutations_on_absent_id_are_noops() {
        let mut store = empty_store();
        let ghost = ProductId::new("999");

        store.remove_from_cart(&ghost);
        store.increase_quantity(&ghost);
        store.decrease_quantity(&ghost);
        store.update_quantity(&ghost, 5);

        assert!(store.entries().is_empty());
        assert!(!store.is_in_cart(&ghost));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut store = empty_store();
        store.add_to_cart(&product("1"));
        store.add_to_cart(&product("5"));

        store.clear();
        assert!(store.entries().is_empty());
        assert_eq!(store.items_count(), 0);
    }

    #[test]
    fn test_count_and_subtotal_consistency() {
        let mut store = empty_store();
        store.add_to_cart(&product("1")); // 2499
        store.add_to_cart(&product("5")); // 399
        store.increase_quantity(&ProductId::new("5"));

        let count: u32 = store.entries().iter().map(|e| e.quantity).sum();
        let subtotal: Price = store.entries().iter().map(CartEntry::line_total).sum();
        assert_eq!(store.items_count(), count);
        assert_eq!(store.subtotal(), subtotal);
        assert_eq!(store.subtotal(), Price::from_major_units(3297));
    }

    #[test]
    fn test_every_mutation_persists() {
        let slot = SharedSlot::default();
        let mut store = CartStore::restore(Box::new(slot.clone()), KEY);
        let laptop = product("2");

        store.add_to_cart(&laptop);
        let persisted = slot.read(KEY).unwrap().unwrap();
        let entries: Vec<CartEntry> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().unwrap().quantity, 1);

        store.clear();
        let persisted = slot.read(KEY).unwrap().unwrap();
        assert_eq!(persisted, "[]");
    }

    #[test]
    fn test_persistence_roundtrip_preserves_order_and_quantities() {
        let slot = SharedSlot::default();
        let mut store = CartStore::restore(Box::new(slot.clone()), KEY);
        store.add_to_cart(&product("5"));
        store.add_to_cart(&product("1"));
        store.add_to_cart(&product("1"));

        let original: Vec<CartEntry> = store.entries().to_vec();

        let restored = CartStore::restore(Box::new(slot), KEY);
        assert_eq!(restored.entries(), original.as_slice());
        assert_eq!(restored.items_count(), 3);
    }

    #[test]
    fn test_corrupt_persisted_cart_yields_empty_cart() {
        // Scenario D: junk in the slot must not propagate an error.
        let slot = MemorySlot::with_value(KEY, "{not json");
        let store = CartStore::restore(Box::new(slot), KEY);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_restore_drops_zero_quantity_entries() {
        let mut seed = MemorySlot::new();
        {
            let mut store = CartStore::restore(Box::new(MemorySlot::new()), KEY);
            store.add_to_cart(&product("1"));
            let mut entries: Vec<CartEntry> =
                serde_json::from_str(&serde_json::to_string(store.entries()).unwrap()).unwrap();
            entries.first_mut().unwrap().quantity = 0;
            seed.write(KEY, &serde_json::to_string(&entries).unwrap())
                .unwrap();
        }

        let store = CartStore::restore(Box::new(seed), KEY);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_sidebar_flags() {
        let mut store = empty_store();
        assert!(!store.is_cart_open());

        store.toggle_cart();
        assert!(store.is_cart_open());
        store.toggle_cart();
        assert!(!store.is_cart_open());

        store.open_cart();
        assert!(store.is_cart_open());
        store.close_cart();
        assert!(!store.is_cart_open());
    }

    #[test]
    fn test_feedback_timers_are_independent() {
        let mut store = empty_store().with_feedback_delay(Duration::from_millis(300));
        let t0 = Instant::now();
        let laptop = product("1");

        store.add_to_cart_with_feedback(&laptop, t0);
        store.add_to_cart_with_feedback(&laptop, t0 + Duration::from_millis(100));

        // Nothing due yet.
        assert_eq!(store.poll_feedback(t0 + Duration::from_millis(299)), 0);
        assert!(!store.is_cart_open());

        // First timer fires, second is still pending.
        assert_eq!(store.poll_feedback(t0 + Duration::from_millis(350)), 1);
        assert!(store.is_cart_open());

        store.close_cart();
        assert_eq!(store.poll_feedback(t0 + Duration::from_millis(450)), 1);
        assert!(store.is_cart_open());
    }

    #[test]
    fn test_subscribers_observe_each_mutation() {
        let seen: Rc<RefCell<Vec<u32>>> = Rc::default();
        let mut store = empty_store();

        let seen_clone = Rc::clone(&seen);
        let id = store.subscribe(move |entries| {
            seen_clone
                .borrow_mut()
                .push(entries.iter().map(|e| e.quantity).sum());
        });

        let laptop = product("1");
        store.add_to_cart(&laptop);
        store.add_to_cart(&laptop);
        store.remove_from_cart(&laptop.id);
        assert_eq!(*seen.borrow(), vec![1, 2, 0]);

        // Sidebar changes are not cart mutations.
        store.toggle_cart();
        assert_eq!(seen.borrow().len(), 3);

        assert!(store.unsubscribe(id));
        store.add_to_cart(&laptop);
        assert_eq!(seen.borrow().len(), 3);
        assert!(!store.unsubscribe(id));
    }
}
