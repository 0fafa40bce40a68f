//! Local axum server standing in for the inference backend.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use chatgate::adapter::outbound::inference::HttpBackend;
use tokio::net::TcpListener;
use url::Url;

pub const TOKEN: &str = "test-token";

/// Serve `router` on an ephemeral port and return its address.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock backend");
    });
    addr
}

/// Client pointed at a mock backend's `/analyze/text` and `/analyze/image`.
pub fn client_for(addr: SocketAddr) -> HttpBackend {
    let base = format!("http://{addr}");
    HttpBackend::new(
        Url::parse(&format!("{base}/analyze/text")).expect("text url"),
        Url::parse(&format!("{base}/analyze/image")).expect("image url"),
        TOKEN,
        Duration::from_secs(5),
    )
    .expect("build client")
}
