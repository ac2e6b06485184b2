//! Per-element one-shot state machine.
//!
//! ```text
//! Pending ──trigger──▶ Triggered ──detach──▶ Detached
//! ```
//!
//! Both transitions succeed at most once per element, so an effect guarded by
//! `trigger` runs once and an unobserve guarded by `detach` happens once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Triggered,
    Detached,
}

#[derive(Debug)]
pub struct OneShot<N> {
    items: Vec<(N, Phase)>,
}

impl<N: PartialEq> OneShot<N> {
    pub fn new(nodes: impl IntoIterator<Item = N>) -> Self {
        Self {
            items: nodes.into_iter().map(|n| (n, Phase::Pending)).collect(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.items.iter().map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self, node: &N) -> Option<Phase> {
        self.items.iter().find(|(n, _)| n == node).map(|(_, p)| *p)
    }

    /// `Pending → Triggered`. Returns `false` for anything else.
    pub fn trigger(&mut self, node: &N) -> bool {
        self.advance(node, Phase::Pending, Phase::Triggered)
    }

    /// `Triggered → Detached`. Returns `false` for anything else.
    pub fn detach(&mut self, node: &N) -> bool {
        self.advance(node, Phase::Triggered, Phase::Detached)
    }

    /// Elements still waiting for their trigger.
    pub fn pending(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, p)| *p == Phase::Pending)
            .count()
    }

    fn advance(&mut self, node: &N, from: Phase, to: Phase) -> bool {
        match self.items.iter_mut().find(|(n, _)| n == node) {
            Some((_, phase)) if *phase == from => {
                *phase = to;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_happen_once() {
        let mut shots = OneShot::new(["a", "b"]);
        assert_eq!(shots.pending(), 2);

        // Detach before trigger is refused
        assert!(!shots.detach(&"a"));

        assert!(shots.trigger(&"a"));
        assert!(!shots.trigger(&"a"));
        assert_eq!(shots.phase(&"a"), Some(Phase::Triggered));

        assert!(shots.detach(&"a"));
        assert!(!shots.detach(&"a"));
        assert!(!shots.trigger(&"a"));
        assert_eq!(shots.phase(&"a"), Some(Phase::Detached));
        assert_eq!(shots.pending(), 1);
    }

    #[test]
    fn test_unknown_node() {
        let mut shots = OneShot::new(["a"]);
        assert!(!shots.trigger(&"z"));
        assert_eq!(shots.phase(&"z"), None);
    }
}
