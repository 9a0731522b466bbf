use crate::channels::traits::{Channel, IncomingMessage};
use crate::router::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

const CHANNEL_INITIAL_BACKOFF_SECS: u64 = 2;
const CHANNEL_MAX_BACKOFF_SECS: u64 = 60;

/// Keep `ch.listen` running, restarting it with exponential backoff until the
/// receiving side goes away.
pub(crate) fn spawn_supervised_listener(
    ch: Arc<dyn Channel>,
    tx: tokio::sync::mpsc::Sender<IncomingMessage>,
    initial_backoff_secs: u64,
    max_backoff_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let component = format!("channel:{}", ch.name());
        let mut backoff = initial_backoff_secs.max(1);
        let max_backoff = max_backoff_secs.max(backoff);

        loop {
            tracing::debug!(component, "channel listener starting");
            let result = ch.listen(tx.clone()).await;

            if tx.is_closed() {
                break;
            }

            match result {
                Ok(()) => {
                    tracing::warn!("Channel {} exited unexpectedly; restarting", ch.name());
                    backoff = initial_backoff_secs.max(1);
                }
                Err(e) => {
                    tracing::error!("Channel {} error: {e:#}; restarting", ch.name());
                }
            }

            tokio::time::sleep(Duration::from_secs(backoff)).await;
            // Double after sleeping so the first failure waits the initial backoff
            backoff = backoff.saturating_mul(2).min(max_backoff);
        }
    })
}

/// Route every inbound message on its own task until `shutdown` resolves,
/// then wait for in-flight requests to finish.
pub async fn serve<F>(channel: Arc<dyn Channel>, router: Arc<Router>, shutdown: F)
where
    F: Future<Output = ()>,
{
    let (tx, mut rx) = tokio::sync::mpsc::channel::<IncomingMessage>(100);
    let listener = spawn_supervised_listener(
        Arc::clone(&channel),
        tx,
        CHANNEL_INITIAL_BACKOFF_SECS,
        CHANNEL_MAX_BACKOFF_SECS,
    );

    let mut in_flight = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            received = rx.recv() => {
                let Some(msg) = received else { break };
                let channel = Arc::clone(&channel);
                let router = Arc::clone(&router);
                in_flight.spawn(async move {
                    if let Err(e) = router.handle(channel.as_ref(), &msg).await {
                        tracing::warn!(
                            request_id = %msg.id,
                            chat_id = %msg.chat_id,
                            "reply delivery failed: {e:#}"
                        );
                    }
                });
            }
            () = &mut shutdown => {
                tracing::info!("shutting down; waiting for in-flight requests");
                break;
            }
            // Reap finished handlers so the set does not grow unbounded
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    listener.abort();
    while in_flight.join_next().await.is_some() {}
}
