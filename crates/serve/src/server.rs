use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use surface_common::SurfaceConfig;
use surface_render::{RenderError, Renderer, SvgSurfaceRenderer};
use tracing::{debug, info, warn};

/// Bytes allowed for the request line plus all header lines.
const MAX_HEAD_BYTES: u64 = 64 * 1024;

/// Unread request bytes discarded after the response before closing.
const MAX_LINGER_BYTES: u64 = 1024 * 1024;
const LINGER_TIMEOUT: Duration = Duration::from_secs(2);

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Errors from the HTTP endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// The parts of a request line the endpoint looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Request target with any query string or fragment removed.
    pub path: String,
}

/// Where a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Surface,
    NotFound,
    MethodNotAllowed,
}

impl Request {
    /// Parse `METHOD TARGET HTTP/x.y`. Returns `None` for anything else.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let method = parts.next()?;
        let target = parts.next()?;
        let version = parts.next()?;
        if parts.next().is_some() || !version.starts_with("HTTP/") {
            return None;
        }
        let path = target.split(['?', '#']).next().unwrap_or(target);
        Some(Self {
            method: method.to_string(),
            path: path.to_string(),
        })
    }

    pub fn route(&self) -> Route {
        if self.path != "/" {
            Route::NotFound
        } else if self.method != "GET" {
            Route::MethodNotAllowed
        } else {
            Route::Surface
        }
    }
}

/// Blocking HTTP listener that renders the surface for every `GET /`.
///
/// Each accepted connection is handled on its own thread; the renderer is
/// stateless, so threads share nothing but a copy of the configuration.
pub struct SurfaceServer {
    listener: TcpListener,
    surface: SurfaceConfig,
}

impl SurfaceServer {
    /// Bind the listener. Failing to bind is the only fatal server error.
    pub fn bind(addr: &str, surface: SurfaceConfig) -> Result<Self, ServeError> {
        let listener = TcpListener::bind(addr).map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Self { listener, surface })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServeError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the process exits.
    pub fn run(self) -> Result<(), ServeError> {
        let addr = self.local_addr()?;
        info!(%addr, "serving surface on http://{addr}/");

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            let surface = self.surface;
            thread::spawn(move || {
                if let Err(e) = handle_connection(&stream, &surface) {
                    warn!(error = %e, "connection failed");
                }
            });
        }
        Ok(())
    }
}

/// Outcome of reading a request head.
#[derive(Debug, PartialEq, Eq)]
enum RequestHead {
    /// The peer closed the connection without sending anything.
    Closed,
    /// The head did not end within the byte budget.
    TooLarge,
    /// The request line; headers were read and discarded.
    Line(String),
}

fn handle_connection(stream: &TcpStream, surface: &SurfaceConfig) -> Result<(), ServeError> {
    let peer = stream.peer_addr().ok();
    let mut reader = BufReader::new(stream);
    let head = read_request_head(&mut reader, MAX_HEAD_BYTES)?;

    let mut out = BufWriter::new(stream);
    match head {
        RequestHead::Closed => {
            debug!(?peer, "connection closed before request line");
            return Ok(());
        }
        RequestHead::TooLarge => {
            debug!(?peer, limit = MAX_HEAD_BYTES, "request head too large");
            write_text(&mut out, 431, &[], "request header fields too large\n")?;
        }
        RequestHead::Line(line) => match Request::parse_line(&line) {
            None => {
                debug!(?peer, line = %line.trim_end(), "malformed request line");
                write_text(&mut out, 400, &[], "bad request\n")?;
            }
            Some(request) => {
                let status = respond(&mut out, &request, surface)?;
                debug!(
                    ?peer,
                    method = %request.method,
                    path = %request.path,
                    status,
                    "request served"
                );
            }
        },
    }
    out.flush()?;
    drop(out);

    linger(stream, &mut reader);
    Ok(())
}

fn respond<W: Write>(
    out: &mut W,
    request: &Request,
    surface: &SurfaceConfig,
) -> Result<u16, ServeError> {
    let status = match request.route() {
        Route::Surface => {
            write_head(out, 200, SVG_CONTENT_TYPE, &[])?;
            SvgSurfaceRenderer::new(*surface).render(out)?;
            200
        }
        Route::NotFound => {
            write_text(out, 404, &[], "not found\n")?;
            404
        }
        Route::MethodNotAllowed => {
            write_text(out, 405, &[("Allow", "GET")], "method not allowed\n")?;
            405
        }
    };
    Ok(status)
}

/// Half-close, then discard request bytes the handler never read (a body,
/// or the rest of an oversized head) so closing does not reset the
/// connection before the client has read the response.
fn linger<R: Read>(stream: &TcpStream, reader: &mut R) {
    if stream.shutdown(Shutdown::Write).is_err() {
        return;
    }
    if stream.set_read_timeout(Some(LINGER_TIMEOUT)).is_err() {
        return;
    }
    let _ = io::copy(&mut reader.by_ref().take(MAX_LINGER_BYTES), &mut io::sink());
}

/// Read the request line and discard the headers up to the blank line,
/// spending at most `limit` bytes on the whole head.
fn read_request_head<R: BufRead>(reader: &mut R, limit: u64) -> io::Result<RequestHead> {
    let mut budget = limit;

    let mut request_line = String::new();
    match read_line_within(reader, &mut request_line, &mut budget)? {
        None => return Ok(RequestHead::TooLarge),
        Some(0) => return Ok(RequestHead::Closed),
        Some(_) => {}
    }

    let mut header = String::new();
    loop {
        header.clear();
        match read_line_within(reader, &mut header, &mut budget)? {
            None => return Ok(RequestHead::TooLarge),
            Some(0) => break,
            Some(_) if header.trim_end().is_empty() => break,
            Some(_) => {}
        }
    }
    Ok(RequestHead::Line(request_line))
}

/// Read one line, charging it to `budget`. Returns `None` when the budget
/// ran out before the line's newline.
fn read_line_within<R: BufRead>(
    reader: &mut R,
    buf: &mut String,
    budget: &mut u64,
) -> io::Result<Option<usize>> {
    let n = reader.by_ref().take(*budget).read_line(buf)?;
    *budget -= n as u64;
    if *budget == 0 && !buf.ends_with('\n') {
        return Ok(None);
    }
    Ok(Some(n))
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        431 => "Request Header Fields Too Large",
        _ => "Internal Server Error",
    }
}

/// Status line and headers. The body is delimited by closing the connection.
fn write_head<W: Write>(
    out: &mut W,
    status: u16,
    content_type: &str,
    extra: &[(&str, &str)],
) -> io::Result<()> {
    write!(out, "HTTP/1.1 {status} {}\r\n", reason(status))?;
    write!(out, "Content-Type: {content_type}\r\n")?;
    for (name, value) in extra {
        write!(out, "{name}: {value}\r\n")?;
    }
    write!(out, "Connection: close\r\n\r\n")
}

fn write_text<W: Write>(
    out: &mut W,
    status: u16,
    extra: &[(&str, &str)],
    body: &str,
) -> io::Result<()> {
    let length = body.len().to_string();
    let mut headers = extra.to_vec();
    headers.push(("Content-Length", &length));
    write_head(out, status, "text/plain; charset=utf-8", &headers)?;
    out.write_all(body.as_bytes())
}
