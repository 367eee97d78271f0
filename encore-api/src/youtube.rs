//! Video reference normalization
//!
//! Clients may describe a video three ways: a raw YouTube video ID, a full
//! YouTube URL, or a URL to a file uploaded to the media host. Persisted
//! rows hold exactly one of two canonical shapes:
//!
//! - hosted: `video_url` set, `video_id` and `youtube_url` NULL
//! - YouTube: `video_id` set plus a canonical `youtube_url`
//!
//! Precedence is fixed: a hosted URL wins outright, then a supplied ID,
//! then extraction from the URL. Empty strings count as absent.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Recognized YouTube URL shapes, in precedence order: `watch?v=`,
/// `youtu.be/`, `embed/`. The capture stops at `&`, newline, `?` or `#`.
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
        .expect("video id pattern is valid")
});

/// 11-character YouTube video ID format
static VALID_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("video id format is valid"));

/// No usable source supplied, or the URL matched no known shape
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Video ID or video file is required")]
pub struct MissingSource;

/// Heterogeneous client input for a video reference
#[derive(Debug, Default, Clone)]
pub struct SourceInput {
    pub video_id: Option<String>,
    pub youtube_url: Option<String>,
    pub video_url: Option<String>,
}

/// Canonical persisted shape of a video reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// File uploaded to the media host
    Hosted { video_url: String },
    /// Externally hosted YouTube video
    YouTube {
        video_id: String,
        youtube_url: String,
    },
}

impl VideoSource {
    /// The three column values (video_id, youtube_url, video_url)
    pub fn columns(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        match self {
            VideoSource::Hosted { video_url } => (None, None, Some(video_url)),
            VideoSource::YouTube {
                video_id,
                youtube_url,
            } => (Some(video_id), Some(youtube_url), None),
        }
    }
}

/// Extract a video ID from a YouTube URL, or None when no pattern matches
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Check the 11-character alphanumeric/hyphen/underscore ID format
pub fn is_valid_video_id(id: &str) -> bool {
    VALID_ID_RE.is_match(id)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Normalize client input into a canonical video source.
///
/// A supplied ID is trusted as-is; the URL is only consulted when the ID is
/// absent. Used for video creation.
pub fn normalize(input: &SourceInput) -> Result<VideoSource, MissingSource> {
    normalize_inner(input, false)
}

/// Normalize client input, re-deriving the ID from the URL whenever the
/// supplied ID fails the 11-character format check. Used for the hero
/// singleton, where a stale or mangled ID pasted alongside a good URL is
/// silently replaced by the derived one.
pub fn normalize_strict(input: &SourceInput) -> Result<VideoSource, MissingSource> {
    normalize_inner(input, true)
}

fn normalize_inner(input: &SourceInput, strict: bool) -> Result<VideoSource, MissingSource> {
    // Hosted URL wins outright
    if let Some(video_url) = non_empty(input.video_url.as_ref()) {
        return Ok(VideoSource::Hosted {
            video_url: video_url.to_string(),
        });
    }

    let supplied_id = non_empty(input.video_id.as_ref());
    let youtube_url = non_empty(input.youtube_url.as_ref());

    let mut video_id = supplied_id.map(str::to_string);

    let needs_derivation = match supplied_id {
        None => true,
        Some(id) => strict && !is_valid_video_id(id),
    };
    if needs_derivation {
        if let Some(derived) = youtube_url.and_then(extract_video_id) {
            video_id = Some(derived);
        }
    }

    match video_id {
        Some(video_id) => {
            let youtube_url = youtube_url
                .map(str::to_string)
                .unwrap_or_else(|| watch_url(&video_id));
            Ok(VideoSource::YouTube {
                video_id,
                youtube_url,
            })
        }
        None => Err(MissingSource),
    }
}
