//! Ping-pong buffer pair with an explicit read index.
//!
//! [`PingPong`] owns two buffers of identical shape. Before the first step
//! the seed is written into [`Slot::First`]. Each step borrows the pair as
//! `(read, write)`; [`PingPong::commit`] flips the read index so the buffer
//! just written becomes the next read source.
//!
//! After `n` committed steps the result lives in `Slot::Second` if `n` is
//! odd and in `Slot::First` if `n` is even (including `n = 0`, where the
//! seed is the result).

/// One of the two buffers of a [`PingPong`] pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Index 0, the seed buffer.
    First,
    /// Index 1.
    Second,
}

impl Slot {
    /// Array index of the slot.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The other slot.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Two buffers and a read index toggled after every committed step.
#[derive(Debug)]
pub struct PingPong<B> {
    buffers: [B; 2],
    read: Slot,
    steps: u32,
}

impl<B> PingPong<B> {
    /// The slot that receives the seed.
    pub const SEED_SLOT: Slot = Slot::First;

    /// Take ownership of a freshly allocated pair. Reads start at `first`.
    pub fn new(first: B, second: B) -> Self {
        Self {
            buffers: [first, second],
            read: Slot::First,
            steps: 0,
        }
    }

    /// Mutable access to the seed buffer.
    ///
    /// Only meaningful before the first step; afterwards the seed buffer
    /// is just another half of the pair.
    pub fn seed_mut(&mut self) -> &mut B {
        debug_assert_eq!(self.steps, 0, "seeding after steps have run");
        &mut self.buffers[Self::SEED_SLOT.index()]
    }

    /// Slot the next step reads from.
    pub fn read_slot(&self) -> Slot {
        self.read
    }

    /// Slot the next step writes into.
    pub fn write_slot(&self) -> Slot {
        self.read.other()
    }

    /// Split borrow of the pair as `(read, write)`.
    pub fn split(&mut self) -> (&B, &mut B) {
        let (first, second) = self.buffers.split_at_mut(1);
        match self.read {
            Slot::First => (&first[0], &mut second[0]),
            Slot::Second => (&second[0], &mut first[0]),
        }
    }

    /// Mark the current step as complete and flip the read index.
    pub fn commit(&mut self) {
        self.read = self.read.other();
        self.steps += 1;
    }

    /// Run one step and commit it if `f` succeeds.
    ///
    /// On error the read index is left unchanged, so the last committed
    /// result is still the one [`PingPong::result`] reports.
    pub fn step<E, F>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(&B, &mut B) -> Result<(), E>,
    {
        let (read, write) = self.split();
        f(read, write)?;
        self.commit();
        Ok(())
    }

    /// Number of committed steps.
    pub fn steps_completed(&self) -> u32 {
        self.steps
    }

    /// Slot holding the most recently written data.
    pub fn result_slot(&self) -> Slot {
        self.read
    }

    /// The most recently written buffer (the seed if no step has run).
    pub fn result(&self) -> &B {
        &self.buffers[self.read.index()]
    }

    /// Borrow a specific slot.
    pub fn get(&self, slot: Slot) -> &B {
        &self.buffers[slot.index()]
    }

    /// Consume the pair, returning both buffers in slot order.
    pub fn into_buffers(self) -> [B; 2] {
        self.buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tagged() -> PingPong<Vec<u32>> {
        PingPong::new(Vec::new(), Vec::new())
    }

    #[test]
    fn fresh_pair_reads_seed() {
        let pp = tagged();
        assert_eq!(pp.read_slot(), Slot::First);
        assert_eq!(pp.write_slot(), Slot::Second);
        assert_eq!(pp.result_slot(), Slot::First);
        assert_eq!(pp.steps_completed(), 0);
    }

    #[test]
    fn zero_steps_result_is_seed() {
        let mut pp = tagged();
        pp.seed_mut().push(7);
        assert_eq!(pp.result(), &vec![7]);
    }

    #[test]
    fn commit_flips_read_index() {
        let mut pp = tagged();
        pp.commit();
        assert_eq!(pp.read_slot(), Slot::Second);
        pp.commit();
        assert_eq!(pp.read_slot(), Slot::First);
        assert_eq!(pp.steps_completed(), 2);
    }

    #[test]
    fn step_writes_other_buffer() {
        let mut pp = tagged();
        pp.seed_mut().push(1);
        pp.step::<(), _>(|read, write| {
            write.clear();
            write.extend(read.iter().map(|v| v + 1));
            Ok(())
        })
        .unwrap();
        assert_eq!(pp.get(Slot::First), &vec![1]);
        assert_eq!(pp.get(Slot::Second), &vec![2]);
        assert_eq!(pp.result(), &vec![2]);
    }

    #[test]
    fn failed_step_does_not_commit() {
        let mut pp = tagged();
        let r = pp.step(|_, write| {
            write.push(99);
            Err("boom")
        });
        assert_eq!(r, Err("boom"));
        assert_eq!(pp.steps_completed(), 0);
        assert_eq!(pp.result_slot(), Slot::First);
    }

    #[test]
    fn each_step_records_its_slots() {
        // Every step appends (step, read, write) to the buffer it writes,
        // after copying the history from the buffer it reads.
        let mut pp: PingPong<Vec<(u32, usize, usize)>> = PingPong::new(Vec::new(), Vec::new());
        for i in 0..5 {
            let (r, w) = (pp.read_slot().index(), pp.write_slot().index());
            assert_ne!(r, w);
            pp.step::<(), _>(|read, write| {
                write.clear();
                write.extend_from_slice(read);
                write.push((i, r, w));
                Ok(())
            })
            .unwrap();
        }
        let history = pp.result();
        assert_eq!(history.len(), 5);
        for (i, &(step, r, w)) in history.iter().enumerate() {
            assert_eq!(step, i as u32);
            assert_eq!(r, i % 2);
            assert_eq!(w, 1 - i % 2);
        }
    }

    proptest! {
        #[test]
        fn result_slot_follows_parity(n in 0u32..200) {
            let mut pp = tagged();
            for _ in 0..n {
                pp.commit();
            }
            let expected = if n % 2 == 1 { Slot::Second } else { Slot::First };
            prop_assert_eq!(pp.result_slot(), expected);
            prop_assert_eq!(pp.steps_completed(), n);
        }
    }
}
