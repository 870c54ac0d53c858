use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;
type FetchFn<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

/// Keeps a value fresh by re-fetching it on a fixed interval and publishes
/// every change to subscribers. A failed fetch keeps the previous value.
/// Dropping the poller stops its background task.
pub struct Poller<T> {
    name: &'static str,
    tx: Arc<watch::Sender<T>>,
    fetch: FetchFn<T>,
    task: JoinHandle<()>,
}

async fn poll_once<T: PartialEq>(name: &str, fetch: &FetchFn<T>, tx: &watch::Sender<T>) -> bool {
    match fetch().await {
        Ok(value) => tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        }),
        Err(e) => {
            tracing::warn!("{} poll failed, keeping previous value: {}", name, e);
            false
        }
    }
}

impl<T> Poller<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Starts polling immediately and then every `every`. Must be called
    /// from within a Tokio runtime.
    pub fn spawn<F, Fut>(name: &'static str, initial: T, every: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, String>> + Send + 'static,
    {
        let fetch: FetchFn<T> = Arc::new(move || -> FetchFuture<T> { Box::pin(fetch()) });
        let (tx, _) = watch::channel(initial);
        let tx = Arc::new(tx);

        let task_tx = tx.clone();
        let task_fetch = fetch.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if poll_once(name, &task_fetch, &task_tx).await {
                    tracing::debug!("{} updated", name);
                }
            }
        });

        Poller {
            name,
            tx,
            fetch,
            task,
        }
    }

    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Fetches right away instead of waiting for the next tick. Returns
    /// whether the published value changed.
    pub async fn refresh(&self) -> bool {
        poll_once(self.name, &self.fetch, &self.tx).await
    }

    /// Publishes a value obtained elsewhere, e.g. the result of an admin save.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn polls_on_interval_and_notifies() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let poller = Poller::spawn("counter", 0u32, Duration::from_secs(10), move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        });
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        tokio::time::advance(Duration::from_secs(10)).await;
        rx.changed().await.unwrap();
        assert_eq!(poller.current(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_keep_last_value() {
        let poller = Poller::spawn("failing", 7u32, Duration::from_secs(10), || async {
            Err::<u32, _>("cms down".to_string())
        });
        assert!(!poller.refresh().await);
        assert_eq!(poller.current(), 7);

        poller.publish(9);
        assert_eq!(poller.current(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_the_task() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let poller = Poller::spawn("dropped", 0u32, Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
        });
        tokio::task::yield_now().await;
        drop(poller);
        let seen = calls.load(Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }
}
