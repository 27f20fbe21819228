//! In-memory FIFO job queue with single-dispatch bookkeeping.
//!
//! The queue is an explicit owned structure: a mutex-protected deque of
//! pending jobs, a wake primitive for the idle worker, and an in-flight
//! counter. It is constructed once at startup and shared by reference
//! between the driver (admission) and the worker (draining).
//!
//! # Contract
//!
//! - [`RetryQueue::admit`] appends to the tail, never blocks and never
//!   rejects — capacity control is the driver's responsibility, not the
//!   queue's.
//! - [`RetryQueue::len`] counts pending plus in-flight jobs and is safe to
//!   call concurrently with admission and draining.
//! - [`RetryQueue::take`] hands the head job to the single worker; the job
//!   counts as in-flight until the worker settles it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Notify;

use super::job::Job;

/// Admission-controlled, strictly-serial job queue.
///
/// The pending sequence is unbounded; a retried job re-enters at the
/// *current* tail, behind any jobs admitted since the original attempt.
#[derive(Debug, Default)]
pub struct RetryQueue {
    /// Pending jobs in admission order. Mutated only by `admit` (append)
    /// and `take` (remove head).
    pending: Mutex<VecDeque<Job>>,
    /// Wakes the worker when a job arrives on an empty queue.
    wake: Notify,
    /// Jobs dispatched to the worker but not yet settled.
    in_flight: AtomicUsize,
}

impl RetryQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a job to the tail of the pending sequence.
    ///
    /// Never blocks and always succeeds. If the worker is idle it is woken
    /// to begin draining. Execution is fire-and-forget: completion is
    /// observed only via [`RetryQueue::len`] trending down or the handler's
    /// own side effects.
    pub fn admit(&self, job: Job) {
        self.pending().push_back(job);
        self.wake.notify_one();
    }

    /// Returns the number of pending plus in-flight jobs.
    pub fn len(&self) -> usize {
        self.pending().len() + self.in_flight.load(Ordering::SeqCst)
    }

    /// Returns the number of jobs waiting in the pending sequence.
    pub fn pending_len(&self) -> usize {
        self.pending().len()
    }

    /// Returns the number of jobs currently dispatched to the worker.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Returns whether no job is pending or in flight.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the head job, waiting until one is available.
    ///
    /// The returned job counts as in-flight until [`RetryQueue::settle`] is
    /// called for it. Cancel-safe: a job is only removed in the same poll
    /// that returns it.
    pub(crate) async fn take(&self) -> Job {
        loop {
            {
                let mut pending = self.pending();
                if let Some(job) = pending.pop_front() {
                    self.in_flight.fetch_add(1, Ordering::SeqCst);
                    return job;
                }
            }
            self.wake.notified().await;
        }
    }

    /// Marks one dispatched job as resolved.
    ///
    /// Called by the worker after an execution attempt completes, after any
    /// retry admission, so `len` never undercounts.
    pub(crate) fn settle(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<Job>> {
        self.pending.lock().expect("pending job mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventKind, User};
    use std::sync::Arc;
    use std::time::Duration;

    fn test_job(name: &str) -> Job {
        Job::new(Event::new(EventKind::UserCreated(User {
            id: format!("user-{}", name),
            name: name.to_string(),
            email: format!("{}@example.com", name),
        })))
    }

    #[test]
    fn test_admit_and_len() {
        let queue = RetryQueue::new();
        assert!(queue.is_empty());

        queue.admit(test_job("a"));
        queue.admit(test_job("b"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pending_len(), 2);
        assert_eq!(queue.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_take_is_fifo() {
        let queue = RetryQueue::new();
        let first = test_job("first");
        let second = test_job("second");
        let first_id = first.event.event_id;
        let second_id = second.event.event_id;

        queue.admit(first);
        queue.admit(second);

        assert_eq!(queue.take().await.event.event_id, first_id);
        assert_eq!(queue.take().await.event.event_id, second_id);
    }

    #[tokio::test]
    async fn test_take_counts_in_flight_until_settled() {
        let queue = RetryQueue::new();
        queue.admit(test_job("a"));

        let _job = queue.take().await;
        assert_eq!(queue.pending_len(), 0);
        assert_eq!(queue.in_flight(), 1);
        assert_eq!(queue.len(), 1);

        queue.settle();
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_take_wakes_on_admission() {
        let queue = Arc::new(RetryQueue::new());

        let waiter = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.take().await })
        };

        // Give the waiter a chance to park on the empty queue first.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let job = test_job("late");
        let expected = job.event.event_id;
        queue.admit(job);

        let taken = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("take should wake after admission")
            .expect("waiter task should not panic");
        assert_eq!(taken.event.event_id, expected);
    }

    #[tokio::test]
    async fn test_requeued_job_goes_to_tail() {
        let queue = RetryQueue::new();
        queue.admit(test_job("a"));
        queue.admit(test_job("b"));

        let failed = queue.take().await;
        let failed_id = failed.event.event_id;
        queue.admit(failed.retry());
        queue.settle();

        let next = queue.take().await;
        assert_ne!(next.event.event_id, failed_id);
        queue.settle();

        let tail = queue.take().await;
        assert_eq!(tail.event.event_id, failed_id);
        assert_eq!(tail.event.retry, 1);
    }
}
