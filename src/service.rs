//! Hyper integration, enabled by the `hyper-server` feature.
//!
//! [`PageService`] serves dispatches over hyper. A fresh [`InputCache`] is
//! built for every request and dropped with it, so cached inputs never leak
//! across requests; the registry is shared immutably behind an [`Arc`].

use crate::dispatch::dispatch;
use crate::handler::Outcome;
use crate::input::InputCache;
use crate::registry::Registry;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A hyper `Service` dispatching requests through a shared [`Registry`].
///
/// The request path (with its leading slash stripped, matching how pages
/// are registered) and query are dispatched; the collected request body is
/// seeded into the per-request cache as the buffered raw-body source.
/// Outcomes map onto statuses: success is `200`, a declined handler or a
/// non-callable registration is `503`, an unmatched path is `404`.
#[derive(Clone)]
pub struct PageService {
    registry: Arc<Registry>,
}

impl PageService {
    pub fn new(registry: Arc<Registry>) -> Self {
        PageService { registry }
    }
}

impl Service<Request<Incoming>> for PageService {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let registry = self.registry.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?.to_bytes();

            let mut cache = InputCache::new();
            if !body.is_empty() {
                cache.set_body(body.to_vec());
            }

            let path = parts.uri.path().trim_start_matches('/');
            let target = match parts.uri.query() {
                Some(query) => format!("{}?{}", path, query),
                None => path.to_owned(),
            };

            let status = match dispatch(&registry, &mut cache, &target) {
                Ok(Outcome::Success) => StatusCode::OK,
                Ok(Outcome::Failure) => {
                    debug!("handler declined \"{path}\"");
                    StatusCode::SERVICE_UNAVAILABLE
                }
                Err(err) => {
                    debug!("dispatch failed: {err}");
                    err.status()
                }
            };

            Ok(Response::builder()
                .status(status)
                .body(Full::new(Bytes::new()))
                .unwrap())
        })
    }
}
