//! HTTP endpoint for the page fetch contract.
//!
//! Serves `POST /api/users` with a JSON `FetchRequest` body and answers with
//! the JSON `Page`, evaluated over generated rows.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::header::HeaderValue;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use pingrid_lib::gateway::DataGateway;
use pingrid_lib::gateway::InMemoryGateway;
use pingrid_lib::query::FetchRequest;
use tokio::net::TcpListener;

use crate::error::CliError;

/// Path of the fetch endpoint.
pub const API_PATH: &str = "/api/users";

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(addr: SocketAddr, gateway: Arc<InMemoryGateway>) -> Result<(), CliError> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    log::info!("serving {} rows on {}", gateway.rows().len(), local);
    println!(
        "Serving {} rows on http://{}{}",
        gateway.rows().len(),
        local,
        API_PATH
    );
    serve_listener(listener, gateway).await
}

/// Accept loop over an already bound listener.
pub async fn serve_listener(
    listener: TcpListener,
    gateway: Arc<InMemoryGateway>,
) -> Result<(), CliError> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let gateway = Arc::clone(&gateway);

        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req: Request<Incoming>| {
                let gateway = Arc::clone(&gateway);
                async move { Ok::<_, Infallible>(handle(req, &gateway).await) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                log::debug!("connection from {} closed: {}", peer, e);
            }
        });
    }
}

async fn handle(req: Request<Incoming>, gateway: &InMemoryGateway) -> Response<Full<Bytes>> {
    if req.uri().path() != API_PATH {
        return error_response(StatusCode::NOT_FOUND, "not found");
    }
    if req.method() != Method::POST {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "use POST");
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let request: FetchRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    log::debug!(
        "fetch page {} size {} ({} sort keys, {} filters)",
        request.page_index,
        request.page_size,
        request.sorting.len(),
        request.column_filters.len()
    );

    match gateway.fetch(&request).await {
        Ok(response) => match serde_json::to_vec(response.data()) {
            Ok(json) => json_response(StatusCode::OK, json),
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        },
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message }).to_string();
    json_response(status, body.into_bytes())
}
