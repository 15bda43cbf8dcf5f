//! Population members and the shared best-so-far record.

/// One search agent: a tour and its cached length.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Whale {
    pub(crate) position: Vec<usize>,
    pub(crate) fitness: f64,
}

/// Best tour seen by any whale during a solve.
///
/// Only updated through [`Leader::offer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    position: Vec<usize>,
    fitness: f64,
}

impl Leader {
    /// Starts from an evaluated tour, normally the first whale's.
    pub fn new(position: Vec<usize>, fitness: f64) -> Self {
        Self { position, fitness }
    }

    /// Copies `position` in if `fitness` strictly improves on the current
    /// leader. Returns whether it did.
    pub fn offer(&mut self, position: &[usize], fitness: f64) -> bool {
        if fitness < self.fitness {
            self.position.clear();
            self.position.extend_from_slice(position);
            self.fitness = fitness;
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> &[usize] {
        &self.position
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn into_parts(self) -> (Vec<usize>, f64) {
        (self.position, self.fitness)
    }
}
