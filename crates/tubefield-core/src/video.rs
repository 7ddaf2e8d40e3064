//! YouTube URL parsing.

use std::fmt;

use crate::VizError;

/// Validated YouTube video id (`[A-Za-z0-9_-]+`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn parse(raw: &str) -> Result<Self, VizError> {
        let valid = !raw.is_empty()
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if valid {
            Ok(Self(raw.to_owned()))
        } else {
            Err(VizError::NoVideoId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from `https://<host>/watch?v=<id>` (host containing
/// `youtube.com`) or `https://youtu.be/<id>`.
pub fn extract_video_id(url: &str) -> Result<VideoId, VizError> {
    let url = url.trim();
    let rest = strip_scheme(url).ok_or(VizError::NoVideoId)?;
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let host = host_of(authority).ok_or(VizError::NoVideoId)?;

    let tail = tail.split('#').next().unwrap_or("");
    let (path, query) = match tail.split_once('?') {
        Some((p, q)) => (p, q),
        None => (tail, ""),
    };

    if host.contains("youtube.com") {
        let id = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "v")
            .map(|(_, v)| v)
            .ok_or(VizError::NoVideoId)?;
        VideoId::parse(id)
    } else if host == "youtu.be" {
        VideoId::parse(path.strip_prefix('/').unwrap_or(path))
    } else {
        Err(VizError::NoVideoId)
    }
}

fn strip_scheme(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once("://")?;
    (scheme.eq_ignore_ascii_case("https") || scheme.eq_ignore_ascii_case("http")).then_some(rest)
}

/// Lower-cased host of an authority (`user@host:port`).
fn host_of(authority: &str) -> Option<String> {
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host_port.split(':').next().unwrap_or("");
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}
