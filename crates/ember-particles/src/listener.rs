//! Ordered pre/post render listeners with soft removal

/// When a listener runs within a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerPhase {
    /// After the spawn, before particles are drawn
    Pre,
    /// After every particle has been drawn
    Post,
}

/// Stable handle to a registered listener; ids are never reused
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ListenerId(pub(crate) usize);

impl ListenerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

struct ListenerSlot<F> {
    phase: ListenerPhase,
    removed: bool,
    callback: F,
}

/// Arena of listener slots. Removal flags a slot instead of compacting, so
/// other listeners keep their ids and the registry can be walked by index.
pub struct ListenerRegistry<F> {
    slots: Vec<ListenerSlot<F>>,
}

impl<F> Default for ListenerRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ListenerRegistry<F> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a listener; it gets the next sequential id
    pub fn add(&mut self, phase: ListenerPhase, callback: F) -> ListenerId {
        let id = ListenerId(self.slots.len());
        self.slots.push(ListenerSlot {
            phase,
            removed: false,
            callback,
        });
        id
    }

    /// Flag a listener as removed. Returns false if `id` was never registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) => {
                slot.removed = true;
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, id: ListenerId) -> bool {
        self.slots.get(id.0).is_some_and(|slot| !slot.removed)
    }

    pub fn phase(&self, id: ListenerId) -> Option<ListenerPhase> {
        self.slots.get(id.0).map(|slot| slot.phase)
    }

    /// Registered listeners, including removed ones
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.removed).count()
    }

    /// Callback for `id` if it is still active and runs in `phase`
    pub fn active_mut(&mut self, id: ListenerId, phase: ListenerPhase) -> Option<&mut F> {
        self.slots
            .get_mut(id.0)
            .filter(|slot| !slot.removed && slot.phase == phase)
            .map(|slot| &mut slot.callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ListenerRegistry<&'static str> {
        ListenerRegistry::new()
    }

    fn visited(reg: &mut ListenerRegistry<&'static str>, phase: ListenerPhase) -> Vec<&'static str> {
        (0..reg.len())
            .filter_map(|i| reg.active_mut(ListenerId(i), phase).map(|name| *name))
            .collect()
    }

    #[test]
    fn ids_are_sequential() {
        let mut reg = registry();
        let a = reg.add(ListenerPhase::Pre, "a");
        let b = reg.add(ListenerPhase::Post, "b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(reg.phase(b), Some(ListenerPhase::Post));
    }

    #[test]
    fn phases_keep_registration_order() {
        let mut reg = registry();
        reg.add(ListenerPhase::Pre, "pre1");
        reg.add(ListenerPhase::Post, "post1");
        reg.add(ListenerPhase::Pre, "pre2");
        assert_eq!(visited(&mut reg, ListenerPhase::Pre), vec!["pre1", "pre2"]);
        assert_eq!(visited(&mut reg, ListenerPhase::Post), vec!["post1"]);
    }

    #[test]
    fn soft_removal_keeps_other_ids() {
        let mut reg = registry();
        let a = reg.add(ListenerPhase::Pre, "a");
        let b = reg.add(ListenerPhase::Pre, "b");
        assert!(reg.remove(a));
        assert!(!reg.is_active(a));
        assert!(reg.is_active(b));
        assert_eq!(visited(&mut reg, ListenerPhase::Pre), vec!["b"]);

        // New listeners never recycle the removed slot
        let c = reg.add(ListenerPhase::Pre, "c");
        assert_eq!(c.index(), 2);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.active_count(), 2);
    }

    #[test]
    fn removing_unknown_reports_failure() {
        let mut reg = registry();
        assert!(!reg.remove(ListenerId(4)));
        reg.add(ListenerPhase::Pre, "a");
        assert!(!reg.remove(ListenerId(1)));
        assert_eq!(reg.active_count(), 1);
    }
}
