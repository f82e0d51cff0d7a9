use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet-period scheduler with last-write-wins semantics.
///
/// Every call to `schedule` cancels the pending timer and bumps a monotonic
/// sequence number; only the most recent call's timer may run its work.
/// Because in-flight work cannot be aborted mid-call, completion handlers
/// must re-check `is_current` with the sequence number they were given and
/// drop stale results; timer cancellation alone is not enough.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    seq: Arc<AtomicU64>,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            seq: Arc::new(AtomicU64::new(0)),
            timer: Arc::new(Mutex::new(None)),
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending timer and invalidate in-flight work.
    pub fn cancel(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.timer.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Schedule `work` to run after the quiet period, superseding any pending
    /// or in-flight work. Returns the sequence number tagged onto this
    /// dispatch; `work` receives the same number for stale checks after its
    /// own await points.
    pub fn schedule<F, Fut>(&self, work: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay;
        let current = Arc::clone(&self.seq);

        let mut timer = self.timer.lock().unwrap();
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer keystroke may have landed while we slept
            if current.load(Ordering::SeqCst) == seq {
                work(seq).await;
            }
        }));

        seq
    }

    /// Whether `seq` still identifies the latest dispatch.
    pub fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }
}
