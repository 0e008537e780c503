//! HTTP endpoint for the rendered surface.
//!
//! # Invariants
//! - `GET /` always returns the same SVG document the stdout mode prints.
//! - Connections are independent; a failing connection never stops the
//!   listener.

mod server;

pub use server::{Request, Route, ServeError, SurfaceServer};
