use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Fixed suffix of a cached playlist. The full name is
/// `<unixExpirySeconds>_channels.m3u`; other tooling relies on this layout,
/// so it must not change.
pub const CACHE_SUFFIX: &str = "_channels.m3u";

/// How long a fetched playlist stays valid.
pub const CACHE_RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Looks for a cached playlist in `dir` that has not expired yet.
///
/// Exactly one artifact may be valid at a time. Zero matches, multiple
/// matches, an unparsable expiry prefix or a past expiry are all treated as
/// a miss; this function never fails, it only degrades to a miss with a
/// diagnostic.
pub fn locate_valid_cache(dir: impl AsRef<Path>) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("playlist cache check failed: {e}");
            return None;
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(CACHE_SUFFIX))
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect();

    match matches.len() {
        0 => {
            log::info!("no cached playlist found");
            None
        }
        1 => {
            let path = matches.remove(0);
            let expiry = match parse_expiry(&path) {
                Some(expiry) => expiry,
                None => {
                    log::warn!("unable to parse cache expiry from {}", path.display());
                    return None;
                }
            };

            if unix_now(SystemTime::now()) < expiry {
                log::info!("cached playlist present: {}", path.display());
                Some(path)
            } else {
                log::info!("cached playlist stale: {}", path.display());
                None
            }
        }
        _ => {
            log::warn!("multiple cached playlists found, ignoring all: {matches:?}");
            None
        }
    }
}

/// Path of a new cache artifact in `dir`, named so that it expires
/// [`CACHE_RETENTION`] after `now`.
pub fn expiry_path(dir: impl AsRef<Path>, now: SystemTime) -> PathBuf {
    let expires_at = unix_now(now + CACHE_RETENTION);
    dir.as_ref().join(format!("{expires_at}{CACHE_SUFFIX}"))
}

fn parse_expiry(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    let prefix = name.split('_').next()?;
    prefix.parse().ok()
}

fn unix_now(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}
