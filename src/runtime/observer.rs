//! Intersection-observer registry.
//!
//! The registry is the source of truth for which nodes are observed, by whom and
//! at which threshold. Hosts feed it in one of two ways:
//! - the headless page computes ratios itself and calls [`Observers::evaluate`],
//!   which reports threshold crossings like a real observer would;
//! - the browser host mirrors [`Observers::take_changes`] into native
//!   `IntersectionObserver`s and forwards their entries.

use super::Slot;

/// One intersection notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<N> {
    pub target: N,
    /// Threshold of the registration this entry belongs to.
    pub threshold: f64,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// A registration added or removed since the last [`Observers::take_changes`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverChange<N> {
    Observe { node: N, threshold: f64 },
    Unobserve { node: N, threshold: f64 },
}

#[derive(Debug)]
struct Registration<N> {
    slot: Slot,
    node: N,
    threshold: f64,
    /// Last reported intersecting state; `None` until the first report.
    last: Option<bool>,
}

#[derive(Debug)]
pub struct Observers<N> {
    registrations: Vec<Registration<N>>,
    changes: Vec<ObserverChange<N>>,
}

impl<N> Default for Observers<N> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
            changes: Vec::new(),
        }
    }
}

/// Thresholds come from config, so compare with a tolerance.
fn same_threshold(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

impl<N: Clone + PartialEq> Observers<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `node` for `slot`. Re-observing resets the registration.
    pub fn observe(&mut self, slot: Slot, node: N, threshold: f64) {
        self.unobserve(slot, &node);
        self.changes.push(ObserverChange::Observe {
            node: node.clone(),
            threshold,
        });
        self.registrations.push(Registration {
            slot,
            node,
            threshold,
            last: None,
        });
    }

    /// Stop observing `node` for `slot`. Returns whether it was observed.
    pub fn unobserve(&mut self, slot: Slot, node: &N) -> bool {
        let Some(index) = self
            .registrations
            .iter()
            .position(|r| r.slot == slot && r.node == *node)
        else {
            return false;
        };

        let removed = self.registrations.remove(index);
        self.changes.push(ObserverChange::Unobserve {
            node: removed.node,
            threshold: removed.threshold,
        });
        true
    }

    pub fn is_observed(&self, node: &N) -> bool {
        self.registrations.iter().any(|r| r.node == *node)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Owners of the registrations an entry belongs to.
    pub fn owners(&self, entry: &Entry<N>) -> Vec<Slot> {
        self.registrations
            .iter()
            .filter(|r| r.node == entry.target && same_threshold(r.threshold, entry.threshold))
            .map(|r| r.slot)
            .collect()
    }

    /// Compute entries from current visibility ratios.
    ///
    /// Reports every registration on its first evaluation, then only when the
    /// intersecting state flips. A node intersects once its visible ratio is
    /// positive and at least the threshold.
    pub fn evaluate(&mut self, ratio_of: impl Fn(&N) -> f64) -> Vec<Entry<N>> {
        let mut entries = Vec::new();
        for reg in &mut self.registrations {
            let ratio = ratio_of(&reg.node);
            let is_intersecting = ratio > 0.0 && ratio >= reg.threshold;
            if reg.last == Some(is_intersecting) {
                continue;
            }
            reg.last = Some(is_intersecting);
            entries.push(Entry {
                target: reg.node.clone(),
                threshold: reg.threshold,
                ratio,
                is_intersecting,
            });
        }
        entries
    }

    /// Drain the registration journal.
    pub fn take_changes(&mut self) -> Vec<ObserverChange<N>> {
        std::mem::take(&mut self.changes)
    }
}
