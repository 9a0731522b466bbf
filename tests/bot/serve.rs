use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use linkcap::app::serve;
use linkcap::channels::traits::Channel;
use linkcap::config::LimitsConfig;
use linkcap::messages::Messages;
use linkcap::router::Router;

use crate::support::{RecordingChannel, text_message};

#[tokio::test]
async fn serve_answers_each_chat_and_stops_on_shutdown() {
    let dir = TempDir::new().unwrap();
    let recording = Arc::new(RecordingChannel::new().with_inbox(vec![
        text_message("m1", "100", "http://a, http://b"),
        text_message("m2", "200", "nothing here"),
        text_message("m3", "300", "/help"),
    ]));
    let channel: Arc<dyn Channel> = recording.clone();
    let router = Arc::new(Router::new(
        Messages::default(),
        LimitsConfig::default(),
        dir.path().to_path_buf(),
    ));

    let observed = Arc::clone(&recording);
    let shutdown = async move {
        for _ in 0..200 {
            if observed.texts().len() >= 3 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };

    tokio::time::timeout(Duration::from_secs(5), serve(channel, router, shutdown))
        .await
        .expect("serve did not return after shutdown");

    let mut replies: Vec<(String, String)> = recording
        .recipients()
        .into_iter()
        .zip(recording.texts())
        .collect();
    replies.sort();

    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0].0, "100");
    assert_eq!(replies[0].1, "First 10 links:\n\nhttp://a\nhttp://b");
    assert_eq!(replies[1].0, "200");
    assert_eq!(replies[1].1, "No valid links found.");
    assert_eq!(replies[2].0, "300");
    assert_eq!(replies[2].1, Messages::default().usage());
}
