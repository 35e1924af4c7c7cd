use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Sends `()` every `interval` until cancelled or the receiver is gone.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(interval: Duration, tx: Sender<()>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let join = thread::spawn(move || {
            let mut deadline = Instant::now() + interval;
            loop {
                // Parking can wake early; sleep out the rest of the interval.
                loop {
                    if flag.load(Ordering::Acquire) {
                        return;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    thread::park_timeout(deadline - now);
                }
                if tx.send(()).is_err() {
                    return;
                }
                deadline += interval;
            }
        });
        Self {
            stop,
            join: Some(join),
        }
    }

    /// Stop the ticker and wait for its thread. No tick is sent afterwards.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            join.thread().unpark();
            let _ = join.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
