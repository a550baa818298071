//! Serve registered pages over hyper.
//!
//! Run with: cargo run --example hyper --features hyper-server

use std::sync::Arc;

use hyper::server::conn::http1::Builder as ConnectionBuilder;
use hyper_util::rt::TokioIo;
use pagematch::service::PageService;
use pagematch::{Outcome, Registry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let mut registry = Registry::new();

    // GET /foo/bar/... => 200, with the trailing segments as subpages
    registry.register("foo/bar", |page: &str, subpages: &[String]| {
        println!("{} handled with subpages {:?}", page, subpages);
    });

    // GET /down/... => 503, the handler declines every request
    registry.register("down", |_: &str, _: &[String]| Outcome::Failure);

    let service = PageService::new(Arc::new(registry));

    let listener = TcpListener::bind(("127.0.0.1", 3000)).await.unwrap();
    println!("listening on 127.0.0.1:3000");

    loop {
        let (tcp, _) = listener.accept().await.unwrap();
        let service = service.clone();
        tokio::task::spawn(async move {
            if let Err(err) = ConnectionBuilder::new()
                .serve_connection(TokioIo::new(tcp), service)
                .await
            {
                println!("Error serving connection: {:?}", err);
            }
        });
    }
}
