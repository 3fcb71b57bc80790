use maze_carver_core::{CellCoord, GenerationError, StackError};

/// Push history of the carving walk with a non-destructive probe cursor.
///
/// One owned buffer backs two independent cursors. The mutation cursor is the
/// buffer length: `push` and `pop` move it. The probe cursor walks backward
/// over the same entries without removing anything and is reset to the top on
/// every push. The probe never sits above the mutation cursor.
#[derive(Clone, Debug)]
pub struct BacktrackStack {
    entries: Vec<CellCoord>,
    capacity: usize,
    // Number of entries at or below the probe cursor; zero once exhausted.
    probe: usize,
}

impl BacktrackStack {
    /// Reserves a stack able to hold `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self, GenerationError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| GenerationError::Allocation {
                cells: capacity as u64,
            })?;

        Ok(Self {
            entries,
            capacity,
            probe: 0,
        })
    }

    /// Appends `coord` above the current top and moves the probe cursor onto it.
    pub fn push(&mut self, coord: CellCoord) -> Result<(), StackError> {
        if self.entries.len() == self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }

        self.entries.push(coord);
        self.probe = self.entries.len();
        Ok(())
    }

    /// Removes and returns the top entry.
    pub fn pop(&mut self) -> Result<CellCoord, StackError> {
        let coord = self.entries.pop().ok_or(StackError::Underflow)?;
        self.probe = self.probe.min(self.entries.len());
        Ok(coord)
    }

    /// Returns the entry under the probe cursor, then moves the cursor one slot down.
    ///
    /// The stack itself is left untouched.
    pub fn probe_next(&mut self) -> Result<CellCoord, StackError> {
        let position = self.probe.checked_sub(1).ok_or(StackError::ProbeExhausted)?;
        let coord = self
            .entries
            .get(position)
            .copied()
            .ok_or(StackError::ProbeExhausted)?;
        self.probe = position;
        Ok(coord)
    }

    /// Index of the slot the next [`probe_next`](Self::probe_next) call returns.
    #[must_use]
    pub fn probe_position(&self) -> Option<usize> {
        self.probe.checked_sub(1)
    }

    /// Entry at the top of the stack.
    #[must_use]
    pub fn top(&self) -> Option<CellCoord> {
        self.entries.last().copied()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the stack holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries the stack accepts.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::BacktrackStack;
    use maze_carver_core::{CellCoord, StackError};

    fn coord(index: u32) -> CellCoord {
        CellCoord::new(0, index)
    }

    #[test]
    fn push_and_pop_follow_lifo_order() {
        let mut stack = BacktrackStack::with_capacity(3).expect("allocation");
        stack.push(coord(0)).expect("space");
        stack.push(coord(1)).expect("space");

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top(), Some(coord(1)));
        assert_eq!(stack.pop(), Ok(coord(1)));
        assert_eq!(stack.pop(), Ok(coord(0)));
        assert!(stack.is_empty());
    }

    #[test]
    fn push_beyond_capacity_overflows() {
        let mut stack = BacktrackStack::with_capacity(1).expect("allocation");
        stack.push(coord(0)).expect("space");
        assert_eq!(
            stack.push(coord(1)),
            Err(StackError::Overflow { capacity: 1 })
        );
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn pop_on_empty_stack_underflows() {
        let mut stack = BacktrackStack::with_capacity(2).expect("allocation");
        assert_eq!(stack.pop(), Err(StackError::Underflow));
    }

    #[test]
    fn probe_walks_down_without_removing_entries() {
        let mut stack = BacktrackStack::with_capacity(4).expect("allocation");
        for index in 0..3 {
            stack.push(coord(index)).expect("space");
        }

        assert_eq!(stack.probe_position(), Some(2));
        assert_eq!(stack.probe_next(), Ok(coord(2)));
        assert_eq!(stack.probe_next(), Ok(coord(1)));
        assert_eq!(stack.probe_next(), Ok(coord(0)));
        assert_eq!(stack.probe_next(), Err(StackError::ProbeExhausted));
        assert_eq!(stack.probe_position(), None);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.top(), Some(coord(2)));
    }

    #[test]
    fn push_resets_probe_to_new_top() {
        let mut stack = BacktrackStack::with_capacity(4).expect("allocation");
        stack.push(coord(0)).expect("space");
        stack.push(coord(1)).expect("space");
        assert_eq!(stack.probe_next(), Ok(coord(1)));
        assert_eq!(stack.probe_next(), Ok(coord(0)));

        stack.push(coord(2)).expect("space");
        assert_eq!(stack.probe_position(), Some(2));
        assert_eq!(stack.probe_next(), Ok(coord(2)));
        assert_eq!(stack.probe_next(), Ok(coord(1)));
    }

    #[test]
    fn pop_keeps_probe_at_or_below_top() {
        let mut stack = BacktrackStack::with_capacity(3).expect("allocation");
        stack.push(coord(0)).expect("space");
        stack.push(coord(1)).expect("space");
        assert_eq!(stack.pop(), Ok(coord(1)));

        assert_eq!(stack.probe_position(), Some(0));
        assert_eq!(stack.probe_next(), Ok(coord(0)));
    }

    #[test]
    fn probing_an_empty_stack_is_exhausted() {
        let mut stack = BacktrackStack::with_capacity(2).expect("allocation");
        assert_eq!(stack.probe_next(), Err(StackError::ProbeExhausted));
    }

    #[test]
    fn iter_lists_entries_bottom_to_top() {
        let mut stack = BacktrackStack::with_capacity(3).expect("allocation");
        for index in 0..3 {
            stack.push(coord(index)).expect("space");
        }
        let entries: Vec<_> = stack.iter().collect();
        assert_eq!(entries, vec![coord(0), coord(1), coord(2)]);
        assert_eq!(stack.capacity(), 3);
    }
}
