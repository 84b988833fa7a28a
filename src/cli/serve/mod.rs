//! Preview server with rebuild-on-change.
//!
//! Pages are rendered in memory rather than served from a disk build, so
//! the `theme` URL parameter keeps its per-view semantics: every request
//! can pick its own preset. Static files (styles, images, the resume) come
//! straight from the site root; generated assets and the reload script come
//! from memory. The watcher rebuilds the in-memory pages and bumps the
//! generation counter the reload script polls.

mod path;
mod response;
mod state;
mod watch;

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};

use anyhow::Result;
use crossbeam::channel::{self, Receiver};
use tiny_http::{Request, Server};

use crate::config::cfg;
use crate::core;
use crate::embed;
use crate::log;

use state::SiteState;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

pub fn serve_site() -> Result<()> {
    // The preview is a development context: render diagnostics (skipped
    // sections, rejected theme candidates) are part of what it is for.
    crate::logger::set_verbose(true);

    let config = cfg();
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{addr}");

    // First render happens off the request loop, so early requests get the
    // self-refreshing loading page instead of blocking.
    let site: Arc<OnceLock<SiteState>> = Arc::new(OnceLock::new());
    let background = spawn_site_thread(Arc::clone(&site), shutdown_rx);

    run_request_loop(&server, &site);
    wait_for_shutdown(background);
    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Render the initial state, then hand the thread to the watcher.
fn spawn_site_thread(site: Arc<OnceLock<SiteState>>, shutdown_rx: Receiver<()>) -> JoinHandle<()> {
    thread::spawn(move || {
        let config = cfg();
        match SiteState::load(&config) {
            Ok(loaded) => {
                if site.set(loaded).is_err() {
                    return;
                }
                let Some(state) = site.get() else { return };
                if config.serve.watch {
                    watch::watch_loop(state, &shutdown_rx);
                }
            }
            Err(err) => {
                log!("error"; "initial render failed: {err:#}");
                std::process::exit(1);
            }
        }
    })
}

/// Wait for the background thread to finish after Ctrl+C (max 2 seconds).
fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}

fn run_request_loop(server: &Server, site: &Arc<OnceLock<SiteState>>) {
    // Thread pool keeps one slow file read from blocking other requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let site = Arc::clone(site);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &site) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, site: &OnceLock<SiteState>) -> Result<()> {
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let (path, query) = path::split_url(request.url());

    if path == embed::serve::GENERATION_ENDPOINT {
        return response::respond_generation(request);
    }

    let Some(state) = site.get() else {
        return response::respond_loading(request);
    };

    if let Some(body) = state.embedded(&path) {
        return response::respond_asset(request, &path, body);
    }

    if path == "/" || path == "/index.html" {
        let theme = path::query_param(query, "theme");
        return response::respond_page(request, state.page(theme.as_deref()));
    }

    let config = cfg();
    if let Some(file) = path::resolve_path(&path, &config.root) {
        // The rendered page owns the template's URL; never hand out the raw file
        if file != config.site.template {
            return response::respond_file(request, &file);
        }
    }

    response::respond_not_found(request)
}
