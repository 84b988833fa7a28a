//! HTTP responses for the preview server.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::core;
use crate::embed::serve::LOADING_HTML;
use crate::embed::NoVars;
use crate::utils::html;
use crate::utils::mime::{self, types};

/// Respond with a rendered page, or a 500 page carrying the render error.
pub fn respond_page(request: Request, page: Result<String>) -> Result<()> {
    match page {
        Ok(body) => send(request, 200, types::HTML, body.into_bytes()),
        Err(err) => {
            let raw = format!("{err:#}");
            let msg = html::escape(&raw);
            let body =
                format!("<html><body><h1>Render error</h1><pre>{msg}</pre></body></html>");
            send(request, 500, types::HTML, body.into_bytes())
        }
    }
}

/// Respond with a static file from the site root.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);
    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }
    let body = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    send(request, 200, content_type, body)
}

/// Respond with an in-memory generated asset.
pub fn respond_asset(request: Request, url: &str, body: String) -> Result<()> {
    let content_type = mime::from_path(Path::new(url));
    send(request, 200, content_type, body.into_bytes())
}

/// Respond with the rebuild generation counter (polled by the reload script).
pub fn respond_generation(request: Request) -> Result<()> {
    send(
        request,
        200,
        types::PLAIN,
        core::generation().to_string().into_bytes(),
    )
}

/// Respond with the self-refreshing page shown until the first render.
pub fn respond_loading(request: Request) -> Result<()> {
    let body = LOADING_HTML.render(&NoVars);
    send(request, 200, types::HTML, body.into_bytes())
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send(request, 404, types::PLAIN, b"404 Not Found".to_vec())
}

/// 503 while the server is shutting down.
pub fn respond_unavailable(request: Request) -> Result<()> {
    send(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send(request: Request, status: u16, content_type: &'static str, body: Vec<u8>) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type);
    }
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
