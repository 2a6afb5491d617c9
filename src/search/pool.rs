//! Ranked, capacity-bounded candidate pool.

/// One scored action sequence. Immutable once created.
#[derive(Debug, Clone)]
pub struct Candidate<A> {
    actions: Vec<A>,
    reward: f64,
}

impl<A> Candidate<A> {
    /// Pair a sequence with its measured reward.
    pub fn new(actions: Vec<A>, reward: f64) -> Self {
        Self { actions, reward }
    }

    /// The action sequence.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Accumulated reward from the sequence's rollout.
    pub fn reward(&self) -> f64 {
        self.reward
    }
}

/// Candidates ordered by descending reward, capped at a fixed capacity.
///
/// The ordering invariant is maintained entirely by [`Pool::insert`]; no
/// other operation mutates the contents.
#[derive(Debug)]
pub struct Pool<A> {
    entries: Vec<Candidate<A>>,
    capacity: usize,
}

impl<A> Pool<A> {
    /// Create an empty pool holding at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Insert a candidate at its rank, trimming the tail past capacity.
    ///
    /// The insertion point is the first entry with reward strictly below the
    /// new candidate's, so equal rewards keep their insertion order. When
    /// the pool overflows, exactly one entry is dropped from the tail.
    pub fn insert(&mut self, candidate: Candidate<A>) {
        let at = self
            .entries
            .iter()
            .position(|c| c.reward < candidate.reward)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, candidate);

        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
    }

    /// Number of candidates currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the pool has no candidates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of candidates.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Candidate at `index`, 0 being the best.
    pub fn get(&self, index: usize) -> Option<&Candidate<A>> {
        self.entries.get(index)
    }

    /// The action sequence at `index`.
    ///
    /// Panics if `index` is out of range; selection only produces indices
    /// below `len`.
    pub fn sequence(&self, index: usize) -> &[A] {
        &self.entries[index].actions
    }

    /// Highest-reward candidate, if any.
    pub fn best(&self) -> Option<&Candidate<A>> {
        self.entries.first()
    }

    /// Rewards from best to worst.
    pub fn rewards(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|c| c.reward)
    }
}
