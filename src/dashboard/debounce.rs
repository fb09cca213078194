use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Forwards the last search term of a burst once input has been quiet for
/// `delay`. Dropping the debouncer flushes whatever is pending and stops the
/// task.
pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchDebouncer {
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(delay, in_rx, out_tx));
        (Self { tx: in_tx }, out_rx)
    }

    /// Records a keystroke. Returns false once the task is gone.
    pub fn push(&self, term: impl Into<String>) -> bool {
        self.tx.send(term.into()).is_ok()
    }
}

async fn run(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
) {
    let mut pending: Option<String> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        let sleep_until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                deadline = None;
                if let Some(term) = pending.take() {
                    debug!(term = %term, "search term settled");
                    if output.send(term).is_err() {
                        break;
                    }
                }
            }

            msg = input.recv() => match msg {
                Some(term) => {
                    pending = Some(term);
                    deadline = Some(Instant::now() + delay);
                }
                None => {
                    if let Some(term) = pending.take() {
                        let _ = output.send(term);
                    }
                    break;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_yields_only_the_last_term() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(Duration::from_millis(300));
        for term in ["r", "ri", "ric", "rice"] {
            assert!(debouncer.push(term));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(rx.recv().await.as_deref(), Some("rice"));

        drop(debouncer);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_settle() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(Duration::from_millis(300));
        debouncer.push("egg");
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.push("eggs");
        assert_eq!(rx.recv().await.as_deref(), Some("egg"));
        assert_eq!(rx.recv().await.as_deref(), Some("eggs"));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_sent_before_the_window_closes() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(Duration::from_millis(300));
        debouncer.push("kiwi");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok().as_deref(), Some("kiwi"));
    }
}
