//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use resource_router::config::ServiceConfig;
use resource_router::http::HttpServer;
use resource_router::lifecycle::Shutdown;
use resource_router::resource::{Outcome, Payload, QueryParameters, ResourceHandler};
use resource_router::routing::ResourceRouter;

/// A handler that records each call as text and answers 200 with `name`.
#[allow(dead_code)]
#[derive(Default)]
pub struct Recorder {
    name: &'static str,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Outcome {
        self.calls.lock().unwrap().push(call);
        Outcome::ok(self.name)
    }
}

impl ResourceHandler for Recorder {
    fn create(&self, parent_ids: &[String], payload: Payload) -> Outcome {
        self.record(format!(
            "create {:?} {}",
            parent_ids,
            String::from_utf8_lossy(&payload)
        ))
    }

    fn read_one(&self, id: &str, parent_ids: &[String]) -> Outcome {
        self.record(format!("read_one {} {:?}", id, parent_ids))
    }

    fn read_many(&self, parent_ids: &[String], params: &QueryParameters) -> Outcome {
        let mut keys: Vec<_> = params.iter().collect();
        keys.sort();
        self.record(format!("read_many {:?} {:?}", parent_ids, keys))
    }

    fn update(&self, id: &str, parent_ids: &[String], payload: Payload) -> Outcome {
        self.record(format!(
            "update {} {:?} {}",
            id,
            parent_ids,
            String::from_utf8_lossy(&payload)
        ))
    }

    fn delete(&self, id: &str, parent_ids: &[String]) -> Outcome {
        self.record(format!("delete {} {:?}", id, parent_ids))
    }
}

/// Start a server for `resources` on an ephemeral loopback port.
///
/// Dropping the returned `Shutdown` stops the server.
#[allow(dead_code)]
pub async fn start_server(config: ServiceConfig, resources: ResourceRouter) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(resources));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
