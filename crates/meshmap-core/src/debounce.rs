// ── Debounced callbacks ──
//
// Each wrapper owns a single timer slot. Every call aborts whatever is
// pending and schedules a fresh run, so only the last call in a burst fires.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

type Callback<A> = dyn Fn(A) + Send + Sync;

/// A callback that runs only after `wait` has passed without another call.
pub struct Debounced<A> {
    func: Arc<Callback<A>>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Wrap `func` so bursts of calls collapse into one, made with the last arguments.
pub fn debounce<A, F>(func: F, wait: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        func: Arc::new(func),
        wait,
        pending: Mutex::new(None),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Reschedule the callback with `args`, dropping any pending call.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn call(&self, args: A) {
        let func = Arc::clone(&self.func);
        let wait = self.wait;

        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.abort();
        }
    }

    /// Whether a call is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WAIT: Duration = Duration::from_millis(300);

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, Debounced<u32>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let debounced = debounce(
            move |n: u32| sink.lock().unwrap_or_else(PoisonError::into_inner).push(n),
            WAIT,
        );
        (calls, debounced)
    }

    fn recorded(calls: &Arc<Mutex<Vec<u32>>>) -> Vec<u32> {
        calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_args() {
        let (calls, debounced) = recorder();

        for n in 1..=5 {
            debounced.call(n);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(recorded(&calls).is_empty());

        tokio::time::sleep(WAIT).await;
        assert_eq!(recorded(&calls), vec![5]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separated_calls_each_fire() {
        let (calls, debounced) = recorder();

        debounced.call(1);
        tokio::time::sleep(WAIT * 2).await;
        debounced.call(2);
        tokio::time::sleep(WAIT * 2).await;

        assert_eq!(recorded(&calls), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_call() {
        let (calls, debounced) = recorder();

        debounced.call(7);
        assert!(debounced.is_pending());
        debounced.cancel();
        assert!(!debounced.is_pending());

        tokio::time::sleep(WAIT * 2).await;
        assert!(recorded(&calls).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn wrappers_do_not_share_timers() {
        let fired = Arc::new(AtomicUsize::new(0));
        let a_count = Arc::clone(&fired);
        let b_count = Arc::clone(&fired);
        let a = debounce(move |(): ()| { a_count.fetch_add(1, Ordering::SeqCst); }, WAIT);
        let b = debounce(move |(): ()| { b_count.fetch_add(1, Ordering::SeqCst); }, WAIT);

        a.call(());
        b.call(());
        tokio::time::sleep(WAIT * 2).await;

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
