//! Remote site tests against a local stub origin

mod common;

use common::{BOOKS_JSON, TANAKH_HTML};
use geoulah_core::error::FetchError;
use geoulah_core::service::BookService;
use geoulah_core::source::{ContentSource, HttpSource};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use url::Url;

/// Serve the fixture site under `/site/` until the sender is dropped or signalled
fn spawn_site_server() -> (Url, mpsc::Sender<()>, thread::JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let base = Url::parse(&format!("http://{}/site", server.server_addr())).unwrap();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }
        let request = match server.recv_timeout(Duration::from_millis(50)) {
            Ok(Some(req)) => req,
            Ok(None) => continue,
            Err(_) => break,
        };

        let (status, body) = match request.url() {
            "/site/data/books.json" => (200, BOOKS_JSON),
            "/site/content/miataisrael/tanakh.html" => (200, TANAKH_HTML),
            "/site/broken" => (500, "boom"),
            _ => (404, "not found"),
        };
        let _ = request.respond(tiny_http::Response::from_string(body).with_status_code(status));
    });

    (base, shutdown_tx, handle)
}

#[tokio::test]
async fn test_fetches_relative_to_base_path() {
    let (base, shutdown, handle) = spawn_site_server();
    let source = HttpSource::new(base).unwrap();
    assert!(source.base().path().ends_with("/site/"));

    let body = source.fetch_text("/data/books.json").await.unwrap();
    assert!(body.contains("miataisrael"));

    let body = source
        .fetch_text("./content/miataisrael/tanakh.html")
        .await
        .unwrap();
    assert!(body.contains("Bereshit"));

    shutdown.send(()).unwrap();
    handle.join().unwrap();
}

#[tokio::test]
async fn test_status_errors() {
    let (base, shutdown, handle) = spawn_site_server();
    let source = HttpSource::new(base).unwrap();

    assert!(matches!(
        source.fetch_text("missing.html").await,
        Err(FetchError::NotFound(_))
    ));
    assert!(matches!(
        source.fetch_text("broken").await,
        Err(FetchError::Status { status: 500, .. })
    ));

    shutdown.send(()).unwrap();
    handle.join().unwrap();
}

#[tokio::test]
async fn test_service_over_http() {
    let (base, shutdown, handle) = spawn_site_server();
    let service = BookService::new(Arc::new(HttpSource::new(base).unwrap()));

    let book = service.get_by_slug("miataisrael").await.unwrap();
    let chapter = service.get_chapter(Some(&book), "tanakh").unwrap();
    let content = service.get_chapter_content(&chapter.content_file).await.unwrap();
    assert!(content.contains("Bereshit"));

    shutdown.send(()).unwrap();
    handle.join().unwrap();
}

#[tokio::test]
async fn test_unreachable_origin_is_transport_error() {
    // bind then drop to get a port with nothing listening
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
    let source = HttpSource::new(base).unwrap();

    assert!(matches!(
        source.fetch_text("data/books.json").await,
        Err(FetchError::Transport(_))
    ));
}
