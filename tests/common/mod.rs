//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use tempfile::TempDir;
use tokio::net::TcpListener;

use zshcfg_server::config::ServerConfig;
use zshcfg_server::http::HttpServer;
use zshcfg_server::lifecycle::Shutdown;

/// A running service instance backed by a throwaway home directory.
pub struct TestServer {
    addr: SocketAddr,
    home: TempDir,
    shutdown: Shutdown,
}

impl TestServer {
    /// Spawn the service on an ephemeral port with an isolated home.
    pub async fn spawn() -> Self {
        let home = TempDir::new().unwrap();

        let mut config = ServerConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.assets.enabled = false;
        config.store.home_dir = Some(home.path().to_path_buf());

        let listener = TcpListener::bind(&config.listener.bind_address)
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let server = HttpServer::new(config);
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        Self {
            addr,
            home,
            shutdown,
        }
    }

    /// Full URL for a path on this instance.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// The home directory this instance writes slots under.
    pub fn home(&self) -> &Path {
        self.home.path()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
