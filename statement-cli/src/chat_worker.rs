use statement_core::{respond, StatementSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub request_id: u64,
    pub query: String,
    /// Already-known reply (slash commands); sent without the thinking delay
    pub preset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Thinking { request_id: u64 },
    Reply { request_id: u64, text: String },
}

/// Answer queries one at a time, in arrival order.
///
/// Each answer is held back by `delay` so the UI can show a thinking state;
/// the next query is not looked at until the previous reply has been sent.
/// Presets go through the same queue so they cannot overtake pending answers.
pub async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<ChatRequest>,
    tx: std::sync::mpsc::Sender<ChatEvent>,
    data: Arc<StatementSnapshot>,
    delay: Duration,
) {
    while let Some(req) = rx.recv().await {
        if let Some(text) = req.preset {
            if tx
                .send(ChatEvent::Reply {
                    request_id: req.request_id,
                    text,
                })
                .is_err()
            {
                break;
            }
            continue;
        }

        if tx
            .send(ChatEvent::Thinking {
                request_id: req.request_id,
            })
            .is_err()
        {
            break;
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let text = respond(&req.query, &data);
        debug!(request_id = req.request_id, "reply ready");
        if tx
            .send(ChatEvent::Reply {
                request_id: req.request_id,
                text,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statement_ingest::sample_statement;

    #[tokio::test]
    async fn test_replies_keep_submission_order() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (ev_tx, ev_rx) = std::sync::mpsc::channel();
        let data = Arc::new(sample_statement());

        let queries = ["total balance", "due date", "xyzzy"];
        for (i, q) in queries.iter().enumerate() {
            req_tx
                .send(ChatRequest {
                    request_id: i as u64,
                    query: q.to_string(),
                    preset: None,
                })
                .unwrap();
        }
        drop(req_tx);

        run_worker(req_rx, ev_tx, data.clone(), Duration::from_millis(5)).await;

        let replies: Vec<(u64, String)> = ev_rx
            .try_iter()
            .filter_map(|ev| match ev {
                ChatEvent::Reply { request_id, text } => Some((request_id, text)),
                ChatEvent::Thinking { .. } => None,
            })
            .collect();

        assert_eq!(replies.len(), 3);
        for (i, (id, text)) in replies.iter().enumerate() {
            assert_eq!(*id, i as u64);
            assert_eq!(*text, respond(queries[i], &data));
        }
    }

    #[tokio::test]
    async fn test_thinking_precedes_each_reply() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (ev_tx, ev_rx) = std::sync::mpsc::channel();
        req_tx
            .send(ChatRequest {
                request_id: 7,
                query: "hello".to_string(),
                preset: None,
            })
            .unwrap();
        drop(req_tx);

        run_worker(req_rx, ev_tx, Arc::new(sample_statement()), Duration::ZERO).await;

        let events: Vec<ChatEvent> = ev_rx.try_iter().collect();
        assert_eq!(events[0], ChatEvent::Thinking { request_id: 7 });
        assert!(matches!(&events[1], ChatEvent::Reply { request_id: 7, .. }));
    }

    #[tokio::test]
    async fn test_preset_waits_behind_pending_query() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (ev_tx, ev_rx) = std::sync::mpsc::channel();
        req_tx
            .send(ChatRequest {
                request_id: 0,
                query: "due date".to_string(),
                preset: None,
            })
            .unwrap();
        req_tx
            .send(ChatRequest {
                request_id: 1,
                query: "/help".to_string(),
                preset: Some("help text".to_string()),
            })
            .unwrap();
        drop(req_tx);

        run_worker(req_rx, ev_tx, Arc::new(sample_statement()), Duration::from_millis(5)).await;

        let replies: Vec<ChatEvent> = ev_rx
            .try_iter()
            .filter(|ev| matches!(ev, ChatEvent::Reply { .. }))
            .collect();
        assert_eq!(
            replies,
            vec![
                ChatEvent::Reply {
                    request_id: 0,
                    text: "Your payment is due on Dec 20, 2025.".to_string(),
                },
                ChatEvent::Reply {
                    request_id: 1,
                    text: "help text".to_string(),
                },
            ]
        );
    }
}
