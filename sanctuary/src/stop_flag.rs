use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{signal, sync::Notify};
use tracing::{info, warn};

/// Process-wide shutdown signal shared by the HTTP server and the signal
/// handlers.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        let notified = self.notify.notified();
        if self.is_stopped() {
            return;
        }
        notified.await;
    }
}

pub fn register_signal_handler(stop_flag: &StopFlag) {
    {
        let stop_flag = stop_flag.clone();
        tokio::spawn(async move {
            let _ = signal::ctrl_c().await;
            info!("Ctrl-C received, shutting down");
            stop_flag.stop();
        });
    }
    #[cfg(unix)]
    {
        let stop_flag = stop_flag.clone();
        tokio::spawn(async move {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut terminate) => {
                    terminate.recv().await;
                    info!("SIGTERM received, shutting down");
                    stop_flag.stop();
                }
                Err(e) => warn!("Could not install SIGTERM handler: {}", e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_after_stop() {
        let stop_flag = StopFlag::new();
        let waiter = {
            let stop_flag = stop_flag.clone();
            tokio::spawn(async move { stop_flag.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        stop_flag.stop();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
        assert!(stop_flag.is_stopped());
    }

    #[tokio::test]
    async fn test_wait_on_stopped_flag_is_immediate() {
        let stop_flag = StopFlag::new();
        stop_flag.stop();
        tokio::time::timeout(Duration::from_millis(100), stop_flag.wait())
            .await
            .expect("already stopped");
    }
}
