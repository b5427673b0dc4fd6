//! The playground: append a large batch of rows either synchronously or on
//! the next timer turn.

use tracing::debug;

use crate::clock::Duration;
use crate::items::Item;
use crate::timer::{Scheduler, TimerHandle, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    /// The batch was appended before returning.
    Appended(usize),
    /// The batch will be appended when the deferred timer fires.
    Deferred,
    /// A deferred batch is already pending.
    Busy,
}

pub struct BulkInsertDemo<S: Scheduler> {
    scheduler: S,
    items: Vec<Item>,
    next_id: u64,
    batch: usize,
    legacy_mode: bool,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> BulkInsertDemo<S> {
    pub fn new(scheduler: S, batch: u32) -> Self {
        Self {
            scheduler,
            items: Vec::new(),
            next_id: 1,
            batch: batch.max(1) as usize,
            legacy_mode: false,
            pending: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn legacy_mode(&self) -> bool {
        self.legacy_mode
    }

    pub fn set_legacy_mode(&mut self, on: bool) {
        self.legacy_mode = on;
    }

    pub fn set_batch(&mut self, batch: u32) {
        self.batch = batch.max(1) as usize;
    }

    pub fn add_batch(&mut self) -> BulkOutcome {
        if self.pending.is_some() {
            return BulkOutcome::Busy;
        }
        if self.legacy_mode {
            self.append();
            return BulkOutcome::Appended(self.batch);
        }
        self.pending = Some(self.scheduler.after(Duration::ZERO));
        BulkOutcome::Deferred
    }

    /// Drops every row. A pending deferred batch still lands afterwards.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns whether `id` was this demo's deferred batch.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if !self.pending.as_ref().is_some_and(|h| h.id() == id) {
            return false;
        }
        self.pending = None;
        self.append();
        true
    }

    fn append(&mut self) {
        let start = self.items.len();
        self.items.reserve(self.batch);
        for i in 0..self.batch {
            self.items
                .push(Item::new(self.next_id, format!("Item {}", start + i + 1)));
            self.next_id += 1;
        }
        debug!(added = self.batch, total = self.items.len(), legacy = self.legacy_mode, "bulk insert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    #[test]
    fn legacy_mode_appends_synchronously() {
        let mut demo = BulkInsertDemo::new(ManualScheduler::new(), 1000);
        demo.set_legacy_mode(true);
        assert_eq!(demo.add_batch(), BulkOutcome::Appended(1000));
        assert_eq!(demo.total(), 1000);
        assert_eq!(demo.items()[999].text, "Item 1000");
    }

    #[test]
    fn modern_mode_defers_to_the_next_turn() {
        let sched = ManualScheduler::new();
        let mut demo = BulkInsertDemo::new(sched.clone(), 10);
        assert_eq!(demo.add_batch(), BulkOutcome::Deferred);
        assert!(demo.is_loading());
        assert_eq!(demo.add_batch(), BulkOutcome::Busy);
        assert_eq!(demo.total(), 0);

        sched.run_for(Duration::ZERO, |id| {
            demo.on_timer(id);
        });
        assert!(!demo.is_loading());
        assert_eq!(demo.total(), 10);
    }

    #[test]
    fn ids_stay_unique_across_clears() {
        let mut demo = BulkInsertDemo::new(ManualScheduler::new(), 3);
        demo.set_legacy_mode(true);
        demo.add_batch();
        let last = demo.items()[2].id;
        demo.clear();
        demo.add_batch();
        assert_eq!(demo.items()[0].text, "Item 1");
        assert!(demo.items()[0].id > last);
    }
}
