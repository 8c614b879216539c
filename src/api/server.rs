//! HTTP server lifecycle: bind → spawn background task → return a handle
//! with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::app_router;
use crate::classifier::ReadmissionClassifier;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Handle to a running form server.
pub struct FormServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl FormServer {
    /// Base URL of the running server, e.g. `http://127.0.0.1:8501`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Ask the server to stop accepting connections.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Form server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish (after `shutdown`).
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Form server task failed: {e}");
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Bind `addr` and serve the form in a background tokio task.
///
/// The classifier must already be loaded: requests are only accepted
/// once it is available.
pub async fn start_server(
    classifier: Arc<dyn ReadmissionClassifier>,
    addr: SocketAddr,
) -> Result<FormServer, std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let app = app_router(classifier);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Form server received shutdown signal");
        };

        tracing::info!(%addr, "Form server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Form server error: {e}");
        }

        tracing::info!("Form server stopped");
    });

    Ok(FormServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MockClassifier;

    fn localhost() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let classifier = Arc::new(MockClassifier::with_probability(0.4));
        let mut server = start_server(classifier, localhost())
            .await
            .expect("server should start");

        assert!(server.addr.port() > 0);

        let resp = reqwest::get(format!("{}/health", server.url())).await.unwrap();
        assert!(resp.status().is_success());
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn form_round_trip_over_http() {
        let classifier = Arc::new(MockClassifier::with_probability(0.36));
        let mut server = start_server(classifier.clone(), localhost())
            .await
            .expect("server should start");

        let resp = reqwest::Client::new()
            .post(format!("{}/predict", server.url()))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("age=%5B60-70%29&gender=Male&diag_1=428")
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let html = resp.text().await.unwrap();
        assert!(html.contains("36.00%"));
        assert!(html.contains("High risk of 30-day readmission"));
        assert_eq!(classifier.call_count(), 1);

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_an_error() {
        let classifier = Arc::new(MockClassifier::with_probability(0.1));
        let mut first = start_server(classifier.clone(), localhost()).await.unwrap();
        let second = start_server(classifier, first.addr).await;
        assert!(second.is_err());

        first.shutdown();
        first.stopped().await;
    }
}
