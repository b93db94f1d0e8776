//! Headless [`Scheduler`] driven by an explicit clock.
//!
//! Useful for hosts without their own timers and for tests. Emissions due at
//! the same instant fire in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::Rng;

use crate::effect::Emission;
use crate::host::{ParticleHost, Scheduler};

#[derive(Debug)]
struct Pending {
    due_ms: u64,
    seq: u64,
    emission: Emission,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        (self.due_ms, self.seq) == (other.due_ms, other.seq)
    }
}
impl Eq for Pending {}
impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Pending>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Outstanding emissions as `(due_ms, emission)`, earliest first.
    pub fn pending(&self) -> Vec<(u64, &Emission)> {
        let mut v: Vec<&Pending> = self.heap.iter().map(|Reverse(p)| p).collect();
        v.sort();
        v.into_iter().map(|p| (p.due_ms, &p.emission)).collect()
    }

    /// Move the clock forward and spawn everything now due. Returns the number
    /// of emissions fired.
    pub fn advance<H, R>(&mut self, elapsed_ms: u64, host: &mut H, rng: &mut R) -> usize
    where
        H: ParticleHost + ?Sized,
        R: Rng + ?Sized,
    {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = 0;
        while self
            .heap
            .peek()
            .is_some_and(|Reverse(p)| p.due_ms <= self.now_ms)
        {
            let Some(Reverse(p)) = self.heap.pop() else { break };
            p.emission.spawn(host, rng);
            fired += 1;
        }
        fired
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay_ms: u32, emission: Emission) {
        let due_ms = self.now_ms.saturating_add(u64::from(delay_ms));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Pending {
            due_ms,
            seq,
            emission,
        }));
    }
}
