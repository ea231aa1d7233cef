use faraday_client::{ClientConfig, FaradayClient};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "sekret";

/// Facade wired to a mock server with a token already on the session.
pub fn authenticated_client(server: &MockServer) -> FaradayClient {
    let uri = server.uri();
    FaradayClient::new(ClientConfig::new(Some(uri.as_str()), false, Some(TEST_TOKEN)))
        .expect("failed to build client")
}

/// Facade wired to a mock server with no token configured.
pub fn anonymous_client(server: &MockServer) -> FaradayClient {
    let uri = server.uri();
    FaradayClient::new(ClientConfig::new(Some(uri.as_str()), false, None))
        .expect("failed to build client")
}

/// Base URL that refuses connections (the port is bound and released).
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}
