//! The page's live connection.
//!
//! The socket itself, its transport and its reconnect policy belong to the
//! host page. This module only describes how it is configured and keeps the
//! one instance created at page load reachable through [`current`], for
//! debugging and inspection. It is installed once and never torn down.
//!
//! Bindings never reach for it: their outbound channel is the
//! [`crate::binding::Outbound`] handed to them per call.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::error::FxError;

pub const DEFAULT_LIVE_PATH: &str = "/live";
pub const DEFAULT_LONG_POLL_FALLBACK_MS: u32 = 2500;

/// `<meta name=...>` keys read by [`ConnectionConfig::from_meta`].
pub const CSRF_META: &str = "csrf-token";
pub const LIVE_PATH_META: &str = "live-path";
pub const LONG_POLL_META: &str = "long-poll-fallback-ms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub path: String,
    pub long_poll_fallback_ms: u32,
    pub csrf_token: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_LIVE_PATH.to_owned(),
            long_poll_fallback_ms: DEFAULT_LONG_POLL_FALLBACK_MS,
            csrf_token: None,
        }
    }
}

impl ConnectionConfig {
    /// Build config from page meta tags.
    ///
    /// Read:
    /// - `csrf-token`: sent as `_csrf_token`; missing is allowed but logged
    ///
    /// Optional:
    /// - `live-path`: default `/live`
    /// - `long-poll-fallback-ms`: default 2500
    pub fn from_meta(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let csrf_token = lookup(CSRF_META).filter(|token| !token.is_empty());
        if csrf_token.is_none() {
            log::warn!("no {CSRF_META} meta tag; live connection will be rejected by the server");
        }

        let path = lookup(LIVE_PATH_META)
            .map(|path| path.trim().to_owned())
            .filter(|path| path.starts_with('/'))
            .unwrap_or_else(|| DEFAULT_LIVE_PATH.to_owned());

        let long_poll_fallback_ms = match lookup(LONG_POLL_META) {
            None => DEFAULT_LONG_POLL_FALLBACK_MS,
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|err| {
                log::warn!("invalid {LONG_POLL_META} {raw:?} ({err}); using {DEFAULT_LONG_POLL_FALLBACK_MS}");
                DEFAULT_LONG_POLL_FALLBACK_MS
            }),
        };

        Self { path, long_poll_fallback_ms, csrf_token }
    }

    /// Connect params sent with the socket join.
    #[must_use]
    pub fn params(&self) -> Value {
        match &self.csrf_token {
            Some(token) => json!({ "_csrf_token": token }),
            None => json!({}),
        }
    }

    /// Options object for the live socket constructor.
    #[must_use]
    pub fn socket_options(&self) -> Value {
        json!({
            "longPollFallbackMs": self.long_poll_fallback_ms,
            "params": self.params(),
        })
    }
}

/// The host's live socket, seen from this crate.
pub trait LiveSocket {
    fn connect(&self);
    fn is_connected(&self) -> bool;
}

/// Config plus the socket it configured.
pub struct Connection {
    config: ConnectionConfig,
    socket: Box<dyn LiveSocket>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("connected", &self.socket.is_connected())
            .finish()
    }
}

impl Connection {
    pub fn new(config: ConnectionConfig, socket: impl LiveSocket + 'static) -> Self {
        Self { config, socket: Box::new(socket) }
    }

    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    #[must_use]
    pub fn socket(&self) -> &dyn LiveSocket {
        self.socket.as_ref()
    }

    pub fn connect(&self) {
        self.socket.connect();
    }
}

thread_local! {
    static CURRENT: OnceCell<Rc<Connection>> = const { OnceCell::new() };
}

/// Make `connection` the page's connection. Only the first call succeeds.
pub fn install(connection: Connection) -> Result<Rc<Connection>, FxError> {
    CURRENT.with(|slot| {
        let shared = Rc::new(connection);
        slot.set(Rc::clone(&shared)).map_err(|_| FxError::ConnectionAlreadyInstalled)?;
        Ok(shared)
    })
}

/// The installed connection, if the page has booted one.
#[must_use]
pub fn current() -> Option<Rc<Connection>> {
    CURRENT.with(|slot| slot.get().cloned())
}
