//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use cors_relay::config::{HeaderMode, RelayConfig, RouteConfig};
use cors_relay::{HttpServer, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A relay running on an ephemeral port. Stops when dropped.
pub struct TestRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
    _root: Option<TempDir>,
}

impl TestRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Static root with the default document and a nested asset.
pub fn static_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("property-mapper.html"),
        "<html><body>property mapper</body></html>",
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("js")).unwrap();
    std::fs::write(dir.path().join("js/app.js"), "console.log('map');").unwrap();
    dir
}

/// Relay config with one proxy route per `(prefix, upstream)` pair.
pub fn relay_config(root: &Path, mode: HeaderMode, routes: &[(&str, &str)]) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.static_files.root = root.display().to_string();
    config.headers.mode = mode;
    config.upstream.use_env_proxy = false;
    config.routes = routes
        .iter()
        .map(|(prefix, upstream)| RouteConfig {
            name: None,
            prefix: prefix.to_string(),
            upstream: upstream.to_string(),
            strip: None,
        })
        .collect();
    config
}

/// Start a relay for `config`.
pub async fn start_relay(config: RelayConfig) -> TestRelay {
    start_relay_owning(config, None).await
}

/// Start a relay serving a fresh [`static_site`] with the given routes.
pub async fn start_relay_with_site(mode: HeaderMode, routes: &[(&str, &str)]) -> TestRelay {
    let site = static_site();
    let config = relay_config(site.path(), mode, routes);
    start_relay_owning(config, Some(site)).await
}

async fn start_relay_owning(config: RelayConfig, root: Option<TempDir>) -> TestRelay {
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, receiver).await.unwrap();
    });

    TestRelay {
        addr,
        shutdown,
        _root: root,
    }
}

/// Client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
