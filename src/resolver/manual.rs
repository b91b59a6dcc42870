//! Normalizing user-entered server addresses.

use url::Url;

use crate::candidate::Candidate;
use crate::config::ServerConfig;

/// Turn what a user typed into the "server address" prompt into a candidate.
///
/// Accepts a bare host (`192.168.1.20`), `host:port`, or a full URL. Bare
/// forms get the configured scheme, port and API path; a full URL keeps its
/// own scheme and port and gains the API path only when it has no path.
pub fn normalize_address(input: &str, server: &ServerConfig) -> Option<Candidate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.contains("://") {
        let url = Url::parse(input).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return None;
        }
        if url.query().is_some() || url.fragment().is_some() {
            return None;
        }
        let trimmed = input.trim_end_matches('/');
        return Some(if url.path() == "/" {
            Candidate::new(format!("{}{}", trimmed, server.api_path))
        } else {
            Candidate::new(trimmed)
        });
    }

    let url = Url::parse(&format!("{}://{}", server.scheme, input)).ok()?;
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return None;
    }
    let host = url.host_str()?;
    // `Url::port` hides a typed port equal to the scheme default.
    let port = if has_typed_port(input) {
        url.port_or_known_default()
    } else {
        None
    };
    Some(Candidate::from_parts(
        &server.scheme,
        host,
        port.unwrap_or(server.port),
        &server.api_path,
    ))
}

/// Whether the authority of a bare `host[:port]` input ends in `:digits`.
fn has_typed_port(input: &str) -> bool {
    let authority = input.split(['/', '?', '#']).next().unwrap_or(input);
    authority
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}
