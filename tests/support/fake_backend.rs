use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_fake_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("Fake backend has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake backend stopped");
    });

    format!("http://{}", addr)
}
