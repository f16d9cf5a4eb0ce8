use itertools::Itertools;

/// what happens to a single stop (and its aligned link) when a route is rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    Discard,
}

/// per-stop keep/discard decisions, aligned 1:1 with a route's stops
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeepMask(pub Vec<KeepDecision>);

impl KeepMask {
    pub fn keep_all(len: usize) -> KeepMask {
        KeepMask(vec![KeepDecision::Keep; len])
    }

    pub fn discard_all(len: usize) -> KeepMask {
        KeepMask(vec![KeepDecision::Discard; len])
    }

    pub fn set(&mut self, index: usize, decision: KeepDecision) {
        self.0[index] = decision;
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keep_count(&self) -> usize {
        self.0.iter().filter(|d| **d == KeepDecision::Keep).count()
    }

    pub fn keeps_all(&self) -> bool {
        self.0.iter().all(|d| *d == KeepDecision::Keep)
    }

    /// indices of the kept positions, ascending
    pub fn kept_indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .positions(|d| *d == KeepDecision::Keep)
            .collect_vec()
    }
}
