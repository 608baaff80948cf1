use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::error::ZapResult;

/// Marker token delimiting playlist entries.
pub const ENTRY_MARKER: &str = "#EXTINF:-1";

static GROUP_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"group-title="(.*)",(.*)"#).unwrap());

/// A single playlist entry. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Display title, the matched `group-title="…",name` portion of the
    /// metadata line.
    pub title: String,
    /// Stream locator handed to the player.
    pub url: String,
}

/// Reads the playlist file at `path` and extracts its channels.
///
/// Fails only when the file itself cannot be read; malformed entries are
/// dealt with inside [`parse_channels`].
pub async fn load_channels(path: impl AsRef<Path>) -> ZapResult<Vec<Channel>> {
    let body = tokio::fs::read_to_string(path).await?;
    Ok(parse_channels(&body))
}

/// Extracts the channel list from raw playlist text, in file order.
///
/// The text is split on [`ENTRY_MARKER`]; everything before the first marker
/// is the playlist header and is discarded. Each entry carries a metadata
/// line with a quoted `group-title` attribute and a trailing display name,
/// followed by the stream URL on the next line. Malformed entries are logged
/// and skipped, they never abort the parse and never produce a channel with
/// empty fields.
pub fn parse_channels(content: &str) -> Vec<Channel> {
    let mut channels = Vec::new();

    for entry in content.split(ENTRY_MARKER).skip(1) {
        let mut lines = entry.lines();
        let metadata = lines.next().unwrap_or_default();
        let url = lines.next().unwrap_or_default().trim();
        if url.is_empty() {
            log::warn!("playlist entry without a stream URL, skipping");
            continue;
        }

        let Some(title) = GROUP_TITLE_REGEX.find(metadata) else {
            log::warn!("playlist entry without a group title, skipping: {metadata:?}");
            continue;
        };

        channels.push(Channel {
            title: title.as_str().to_string(),
            url: url.to_string(),
        });
    }

    channels
}
