//! Authorization callback handling.
//!
//! The authorization server redirects the browser to the redirect URL with
//! either `code` or `error` in the query string. The code reaches us in one of
//! two ways: a short-lived loopback HTTP listener bound to the redirect URL,
//! or the user pasting the redirected URL (or the bare code).

use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use reqwest::Url;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::error::{Result, Yt2sError};

/// Default time to wait for the browser to come back.
pub const DEFAULT_CALLBACK_WAIT: Duration = Duration::from_secs(300);

/// Idle connections that send no request line within this are dropped.
const HEADER_READ_TIMEOUT: Duration = Duration::from_secs(10);

const SUCCESS_PAGE: &str = "<!doctype html><html><body style=\"background:black;color:gray;\
font-family:sans-serif;text-align:center;padding-top:20vh\"><h2 style=\"color:white\">\
<span style=\"color:red\">YouTube</span> 2 <span style=\"color:green\">Spotify</span></h2>\
<p>Login complete. You can close this tab and return to the terminal.</p></body></html>";

const FAILURE_PAGE: &str = "<!doctype html><html><body style=\"background:black;color:gray;\
font-family:sans-serif;text-align:center;padding-top:20vh\"><p>Login failed. \
Check the terminal for details.</p></body></html>";

/// Extract the authorization code from a parsed callback URL.
///
/// # Errors
///
/// [`Yt2sError::AuthorizationDenied`] when the URL carries `error`,
/// [`Yt2sError::InvalidCallback`] when it carries neither `code` nor `error`.
pub fn code_from_url(url: &Url) -> Result<String> {
    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => {
                return Err(Yt2sError::AuthorizationDenied {
                    reason: value.into_owned(),
                });
            }
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or_else(|| Yt2sError::InvalidCallback("no `code` parameter in URL".to_string()))
}

/// Parse what the user pasted: a full callback URL, a bare query string, or
/// the code itself.
///
/// # Errors
///
/// Returns [`Yt2sError::InvalidCallback`] for empty or malformed input, or
/// [`Yt2sError::AuthorizationDenied`] for a callback carrying `error`.
pub fn parse_callback_input(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Yt2sError::InvalidCallback("input is empty".to_string()));
    }

    if trimmed.contains("://") {
        let url = Url::parse(trimmed)
            .map_err(|e| Yt2sError::InvalidCallback(format!("{trimmed}: {e}")))?;
        return code_from_url(&url);
    }

    if trimmed.starts_with('?') || trimmed.contains('=') {
        let query = trimmed.trim_start_matches('?');
        let url = Url::parse(&format!("http://localhost/?{query}"))
            .map_err(|e| Yt2sError::InvalidCallback(format!("{trimmed}: {e}")))?;
        return code_from_url(&url);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(Yt2sError::InvalidCallback(
            "a bare code cannot contain whitespace".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

/// Address and path a loopback redirect URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopbackTarget {
    pub addr: SocketAddr,
    pub path: String,
}

impl LoopbackTarget {
    /// Recognize `http://127.0.0.1:<port>/...`, `http://localhost:<port>/...`
    /// or `http://[::1]:<port>/...`. Anything else cannot be captured locally.
    #[must_use]
    pub fn from_redirect_url(redirect_url: &str) -> Option<Self> {
        let url = Url::parse(redirect_url).ok()?;
        if url.scheme() != "http" {
            return None;
        }

        let ip = match url.host_str()? {
            "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .ok()
                .filter(IpAddr::is_loopback)?,
        };

        Some(Self {
            addr: SocketAddr::new(ip, url.port_or_known_default()?),
            path: url.path().to_string(),
        })
    }
}

/// A bound loopback listener waiting for one authorization callback.
pub struct CallbackListener {
    listener: TcpListener,
    path: String,
}

impl CallbackListener {
    /// Bind before the authorize URL is shown, so the redirect cannot race us.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the address is in use.
    pub async fn bind(target: &LoopbackTarget) -> Result<Self> {
        let listener = TcpListener::bind(target.addr).await?;
        tracing::debug!(addr = %target.addr, path = %target.path, "Callback listener bound");
        Ok(Self {
            listener,
            path: target.path.clone(),
        })
    }

    /// Address actually bound.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve connections until one hits the redirect path with `code` or
    /// `error`, then stop listening.
    ///
    /// # Errors
    ///
    /// [`Yt2sError::CallbackTimeout`] if nothing arrives within `wait`, or the
    /// callback's own error.
    pub async fn wait_for_code(self, wait: Duration) -> Result<String> {
        tokio::time::timeout(wait, self.accept_until_callback())
            .await
            .map_err(|_| Yt2sError::CallbackTimeout(wait.as_secs()))?
    }

    async fn accept_until_callback(self) -> Result<String> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Result<String>>();

        loop {
            tokio::select! {
                Some(outcome) = rx.recv() => return outcome,
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted?;
                    tracing::trace!(%peer, "Callback connection accepted");

                    let tx = tx.clone();
                    let path = self.path.clone();
                    let service = service_fn(move |req: Request<Incoming>| {
                        let response = handle_request(&req, &path, &tx);
                        async move { Ok::<_, Infallible>(response) }
                    });

                    // Browsers preconnect sockets they may never use.
                    tokio::spawn(async move {
                        let mut builder = http1::Builder::new();
                        builder
                            .timer(TokioTimer::new())
                            .header_read_timeout(HEADER_READ_TIMEOUT)
                            .keep_alive(false);
                        if let Err(err) = builder.serve_connection(TokioIo::new(stream), service).await {
                            tracing::debug!(%peer, error = %err, "Callback connection failed");
                        }
                    });
                }
            }
        }
    }
}

fn handle_request(
    req: &Request<Incoming>,
    path: &str,
    tx: &mpsc::UnboundedSender<Result<String>>,
) -> Response<Full<Bytes>> {
    if req.uri().path() != path {
        return html_response(StatusCode::NOT_FOUND, "");
    }

    let query = req.uri().query().unwrap_or_default();
    let outcome = Url::parse(&format!("http://localhost/?{query}"))
        .map_err(|e| Yt2sError::InvalidCallback(e.to_string()))
        .and_then(|url| code_from_url(&url));

    let response = match &outcome {
        Ok(_) => html_response(StatusCode::OK, SUCCESS_PAGE),
        Err(_) => html_response(StatusCode::BAD_REQUEST, FAILURE_PAGE),
    };
    // The receiver lives as long as the accept loop.
    let _ = tx.send(outcome);
    response
}

fn html_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_callback_url() {
        let code = parse_callback_input("http://127.0.0.1:8888/callback?code=AQB123&state=x").unwrap();
        assert_eq!(code, "AQB123");
    }

    #[test]
    fn parses_query_string_and_bare_code() {
        assert_eq!(parse_callback_input("?code=abc").unwrap(), "abc");
        assert_eq!(parse_callback_input("code=abc").unwrap(), "abc");
        assert_eq!(parse_callback_input("  AQBxyz  ").unwrap(), "AQBxyz");
    }

    #[test]
    fn error_parameter_is_denial() {
        let err = parse_callback_input("http://localhost:8888/callback?error=access_denied").unwrap_err();
        assert!(matches!(err, Yt2sError::AuthorizationDenied { reason } if reason == "access_denied"));
    }

    #[test]
    fn url_without_code_is_invalid() {
        let err = parse_callback_input("http://localhost:8888/callback").unwrap_err();
        assert!(matches!(err, Yt2sError::InvalidCallback(_)));
        assert!(parse_callback_input("").is_err());
        assert!(parse_callback_input("two words").is_err());
    }

    #[test]
    fn loopback_targets() {
        let target = LoopbackTarget::from_redirect_url("http://127.0.0.1:8888/callback").unwrap();
        assert_eq!(target.addr, "127.0.0.1:8888".parse().unwrap());
        assert_eq!(target.path, "/callback");

        let target = LoopbackTarget::from_redirect_url("http://localhost:3000/").unwrap();
        assert_eq!(target.addr.port(), 3000);

        assert!(LoopbackTarget::from_redirect_url("https://127.0.0.1:8888/callback").is_none());
        assert!(LoopbackTarget::from_redirect_url("http://example.com/callback").is_none());
    }

    async fn listener_on_ephemeral_port() -> (CallbackListener, SocketAddr) {
        let target = LoopbackTarget {
            addr: "127.0.0.1:0".parse().unwrap(),
            path: "/callback".to_string(),
        };
        let listener = CallbackListener::bind(&target).await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[tokio::test]
    async fn listener_captures_code() {
        let (listener, addr) = listener_on_ephemeral_port().await;

        let browser = tokio::spawn(async move {
            let client = reqwest::Client::new();
            let stray = client
                .get(format!("http://{addr}/favicon.ico"))
                .send()
                .await
                .unwrap();
            assert_eq!(stray.status(), 404);

            let response = client
                .get(format!("http://{addr}/callback?code=AQBcode"))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 200);
            assert!(response.text().await.unwrap().contains("Login complete"));
        });

        let code = listener.wait_for_code(Duration::from_secs(10)).await.unwrap();
        assert_eq!(code, "AQBcode");
        browser.await.unwrap();
    }

    #[tokio::test]
    async fn idle_preconnect_does_not_block_callback() {
        let (listener, addr) = listener_on_ephemeral_port().await;

        let browser = tokio::spawn(async move {
            let idle = tokio::net::TcpStream::connect(addr).await.unwrap();
            let response = reqwest::get(format!("http://{addr}/callback?code=AQBcode"))
                .await
                .unwrap();
            assert_eq!(response.status(), 200);
            drop(idle);
        });

        let code = listener.wait_for_code(Duration::from_secs(5)).await.unwrap();
        assert_eq!(code, "AQBcode");
        browser.await.unwrap();
    }

    #[tokio::test]
    async fn listener_reports_denial() {
        let (listener, addr) = listener_on_ephemeral_port().await;

        tokio::spawn(async move {
            let _ = reqwest::get(format!("http://{addr}/callback?error=access_denied")).await;
        });

        let err = listener.wait_for_code(Duration::from_secs(10)).await.unwrap_err();
        assert!(matches!(err, Yt2sError::AuthorizationDenied { .. }));
    }

    #[tokio::test]
    async fn listener_times_out() {
        let (listener, _addr) = listener_on_ephemeral_port().await;
        let err = listener
            .wait_for_code(Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, Yt2sError::CallbackTimeout(_)));
    }
}
