//! Minimal HTTP front end for the pathfinding engine.
//!
//! Architecture: a listener loop that hands each connection to its own
//! thread. Connections are short-lived (`Connection: close`), each handling
//! one request: parse the request line and headers, read the body, route,
//! write the response. Searches run synchronously on the connection thread,
//! so concurrent requests get independent scratch state by construction.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, info, warn};

use crate::api::{self, PathRequest};
use crate::error::RequestError;

pub struct ServerConfig {
    pub port: u16,
    /// Static files served under `/`; `None` disables static serving.
    pub frontend_dir: Option<PathBuf>,
}

/// Binds the listener and serves until the process exits.
pub fn serve(config: ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port))?;
    info!(port = config.port, "listening");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let frontend = config.frontend_dir.clone();
                thread::spawn(move || {
                    if let Err(err) = handle_connection(stream, frontend.as_deref()) {
                        debug!(%err, "connection ended");
                    }
                });
            }
            Err(err) => warn!(%err, "accept failed"),
        }
    }

    Ok(())
}

#[derive(Debug)]
struct Response {
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    fn json(body: String) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "application/json",
            body: body.into_bytes(),
        }
    }

    fn empty() -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "text/plain",
            body: Vec::new(),
        }
    }
}

fn handle_connection(stream: TcpStream, frontend: Option<&Path>) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(());
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let target = parts.next().unwrap_or_default().to_owned();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        if let Some(value) = line
            .to_ascii_lowercase()
            .strip_prefix("content-length:")
            .map(str::trim)
        {
            content_length = value.parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    debug!(%method, %target, bytes = body.len(), "request");

    let mut stream = stream;
    match route(&method, &target, &body, frontend) {
        Ok(response) => write_response(&mut stream, &response),
        Err(err) => {
            let (status, reason) = err.status();
            let response = Response {
                status,
                reason,
                content_type: "text/plain",
                body: err.to_string().into_bytes(),
            };
            write_response(&mut stream, &response)
        }
    }
}

fn route(
    method: &str,
    target: &str,
    body: &[u8],
    frontend: Option<&Path>,
) -> Result<Response, RequestError> {
    // Preflight requests get the permissive CORS headers and nothing else.
    if method == "OPTIONS" {
        return Ok(Response::empty());
    }

    match target {
        "/api/find-path" => {
            if method != "POST" {
                return Err(RequestError::MethodNotAllowed);
            }
            let request: PathRequest = serde_json::from_slice(body)?;
            let response = api::handle_find_path(&request);
            Ok(Response::json(serde_json::to_string(&response)?))
        }
        "/api/compare-algorithms" => {
            if method != "POST" {
                return Err(RequestError::MethodNotAllowed);
            }
            let request: PathRequest = serde_json::from_slice(body)?;
            let response = api::handle_compare(&request);
            Ok(Response::json(serde_json::to_string(&response)?))
        }
        _ => {
            if method != "GET" {
                return Err(RequestError::MethodNotAllowed);
            }
            serve_static(target, frontend)
        }
    }
}

fn serve_static(target: &str, frontend: Option<&Path>) -> Result<Response, RequestError> {
    let Some(frontend) = frontend else {
        return Err(RequestError::NotFound);
    };

    let relative = target.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };

    // Reject traversal outside the frontend directory.
    if relative.split('/').any(|part| part == "..") {
        return Err(RequestError::NotFound);
    }

    let path = frontend.join(relative);
    let body = std::fs::read(&path).map_err(|_| RequestError::NotFound)?;

    Ok(Response {
        status: 200,
        reason: "OK",
        content_type: content_type_for(&path),
        body,
    })
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn write_response(stream: &mut TcpStream, response: &Response) -> io::Result<()> {
    write!(
        stream,
        "HTTP/1.1 {} {}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: POST, GET, OPTIONS\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Connection: close\r\n\
         \r\n",
        response.status,
        response.reason,
        response.content_type,
        response.body.len(),
    )?;
    stream.write_all(&response.body)?;
    stream.flush()
}
