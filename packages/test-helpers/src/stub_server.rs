//! An HTTP server that answers every request on [`HEALTH_PATH`] with a fixed
//! status code after a fixed delay.
//!
//! It binds to an ephemeral port on `127.0.0.1` so tests can run in parallel.
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
pub use axum::http::{Method, StatusCode};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const HEALTH_PATH: &str = "/health";

/// How the stub server answers.
#[derive(Debug, Clone, Copy)]
pub struct Behaviour {
    pub status: StatusCode,
    pub delay: Duration,
}

impl Behaviour {
    #[must_use]
    pub fn responding(status: StatusCode) -> Self {
        Self {
            status,
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn after(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

impl Default for Behaviour {
    fn default() -> Self {
        Self::responding(StatusCode::OK)
    }
}

struct Shared {
    behaviour: Behaviour,
    hits: AtomicUsize,
    methods: Mutex<Vec<Method>>,
}

pub struct StubServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    join_handle: JoinHandle<()>,
}

impl StubServer {
    /// Starts the stub server.
    ///
    /// # Panics
    ///
    /// Will panic if it can't bind to an ephemeral port.
    pub async fn start(behaviour: Behaviour) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("it should bind the stub server to an ephemeral port");

        let addr = listener.local_addr().expect("it should get the stub server local address");

        let shared = Arc::new(Shared {
            behaviour,
            hits: AtomicUsize::new(0),
            methods: Mutex::new(Vec::new()),
        });

        let app = Router::new().route(HEALTH_PATH, any(respond)).with_state(shared.clone());

        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("the stub server should keep running");
        });

        Self {
            addr,
            shared,
            join_handle,
        }
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The URL of the health endpoint, for example `http://127.0.0.1:43567/health`.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("http://{}{HEALTH_PATH}", self.addr)
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    /// Methods of the requests received so far.
    ///
    /// # Panics
    ///
    /// Will panic if a request handler panicked while holding the lock.
    #[must_use]
    pub fn methods(&self) -> Vec<Method> {
        self.shared.methods.lock().expect("it should lock the received methods").clone()
    }
}

/// A health URL on a local port nothing listens on.
///
/// The port comes from a listener that is closed before returning, so
/// connections are refused unless something else binds it in between.
///
/// # Panics
///
/// Will panic if it can't bind to an ephemeral port.
#[must_use]
pub fn closed_health_url() -> String {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("it should get an ephemeral local address");

    format!("http://{addr}{HEALTH_PATH}")
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}

async fn respond(State(shared): State<Arc<Shared>>, method: Method) -> StatusCode {
    shared.hits.fetch_add(1, Ordering::SeqCst);
    shared
        .methods
        .lock()
        .expect("it should lock the received methods")
        .push(method);

    tokio::time::sleep(shared.behaviour.delay).await;

    shared.behaviour.status
}
