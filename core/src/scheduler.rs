use alloc::collections::BinaryHeap;
use alloc::rc::Rc;
use core::cell::Cell;
use core::cmp::{Ordering, Reverse};
use core::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerStatus {
    Pending,
    Fired,
    Cancelled,
}

/// Handle to a scheduled action.
///
/// Handles are tied to the single context that owns the scheduler, which is why they are neither `Send` nor `Sync`.
#[derive(Clone, Debug)]
pub struct TimerHandle {
    status: Rc<Cell<TimerStatus>>,
}

impl TimerHandle {
    fn new() -> Self {
        Self {
            status: Rc::new(Cell::new(TimerStatus::Pending)),
        }
    }

    /// Keep the action from firing. No-op once it fired or was already cancelled.
    pub fn cancel(&self) {
        if self.status.get() == TimerStatus::Pending {
            self.status.set(TimerStatus::Cancelled);
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status.get()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == TimerStatus::Pending
    }

    /// Claim the action for running, fails when it was cancelled first.
    fn try_fire(&self) -> bool {
        if self.is_pending() {
            self.status.set(TimerStatus::Fired);
            true
        } else {
            false
        }
    }
}

/// Runs actions after a delay unless cancelled first.
///
/// Due actions are handed back through [`Scheduler::poll_due`] so that the owner runs them on its own context, one at
/// a time. Cancellation is checked right before an action is handed out, so an earlier action may still cancel a
/// later one that became due at the same moment.
pub trait Scheduler<A> {
    fn schedule(&mut self, delay: Duration, action: A) -> TimerHandle;

    /// Next due action that has not been cancelled.
    fn poll_due(&mut self) -> Option<A>;

    /// Time left until the earliest pending action, zero if one is already due.
    fn next_deadline(&self) -> Option<Duration>;
}

#[derive(Debug)]
struct Entry<A> {
    deadline: Duration,
    seq: u64,
    handle: TimerHandle,
    action: A,
}

impl<A> PartialEq for Entry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A> Eq for Entry<A> {}

impl<A> PartialOrd for Entry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Entry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// Scheduler driven by an explicit clock: time only moves when [`TimerQueue::advance`] is called.
///
/// Actions due at the same instant come out in the order they were scheduled. While due actions are handed out the
/// clock stands at the deadline of the last one, so anything they schedule counts from that deadline. One long advance
/// and several short ones covering the same span run the same actions.
#[derive(Debug)]
pub struct TimerQueue<A> {
    now: Duration,
    /// Where the clock settles once nothing more is due
    target: Duration,
    next_seq: u64,
    entries: BinaryHeap<Reverse<Entry<A>>>,
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            target: Duration::ZERO,
            next_seq: 0,
            entries: BinaryHeap::new(),
        }
    }

    /// Time elapsed on this queue's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Let `elapsed` pass. Due actions still have to be drained with [`Scheduler::poll_due`].
    pub fn advance(&mut self, elapsed: Duration) {
        self.target = self.target.saturating_add(elapsed);
        self.settle();
    }

    /// Pending actions, cancelled ones included until they are reached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the clock up to the next pending deadline, or all the way to the target.
    fn settle(&mut self) {
        self.drop_cancelled_head();
        let next = self
            .entries
            .peek()
            .map_or(self.target, |Reverse(entry)| entry.deadline.min(self.target));
        self.now = self.now.max(next);
    }

    fn drop_cancelled_head(&mut self) {
        while self
            .entries
            .peek()
            .is_some_and(|Reverse(entry)| !entry.handle.is_pending())
        {
            self.entries.pop();
        }
    }
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> for TimerQueue<A> {
    fn schedule(&mut self, delay: Duration, action: A) -> TimerHandle {
        self.drop_cancelled_head();
        let handle = TimerHandle::new();
        let entry = Entry {
            deadline: self.now.saturating_add(delay),
            seq: self.next_seq,
            handle: handle.clone(),
            action,
        };
        self.next_seq += 1;
        self.entries.push(Reverse(entry));
        handle
    }

    fn poll_due(&mut self) -> Option<A> {
        loop {
            let due = self
                .entries
                .peek()
                .is_some_and(|Reverse(head)| head.deadline <= self.target);
            if !due {
                self.settle();
                return None;
            }
            let Reverse(entry) = self.entries.pop()?;
            if entry.handle.try_fire() {
                self.now = self.now.max(entry.deadline);
                return Some(entry.action);
            }
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter(|Reverse(entry)| entry.handle.is_pending())
            .map(|Reverse(entry)| entry.deadline.saturating_sub(self.target))
            .min()
    }
}
