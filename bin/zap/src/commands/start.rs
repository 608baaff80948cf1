use std::{path::Path, time::SystemTime};

use anyhow::{bail, Context};
use clap::Parser;
use clap_handler::handler;
use zaptv::{
    cache,
    fetch::fetch_and_store,
    playlist::load_channels,
    session::{CastTarget, PlaybackSession},
    ChannelSelector,
};

use crate::selector::PromptSelector;

/// Starts a new session
#[derive(Parser, Clone)]
#[clap(name = "start")]
pub struct StartCommand {
    /// Cast to a chromecast at the given address
    #[clap(short, long)]
    pub cast: Option<String>,

    /// Playlist URL
    pub url: String,
}

#[handler(StartCommand)]
pub async fn start(args: StartCommand) -> anyhow::Result<()> {
    let workdir = Path::new(".");

    let playlist = match cache::locate_valid_cache(workdir) {
        Some(path) => path,
        None => {
            log::info!("fetching playlist...");
            let path = cache::expiry_path(workdir, SystemTime::now());
            fetch_and_store(&reqwest::Client::new(), &args.url, &path)
                .await
                .context("downloading playlist failed")?;
            path
        }
    };

    let channels = load_channels(&playlist)
        .await
        .context("extracting channels from playlist failed")?;
    if channels.is_empty() {
        bail!("no usable channels in {}", playlist.display());
    }

    let mut selector = PromptSelector;
    let Some(index) = selector.select(&channels, |channel| channel.title.clone())? else {
        bail!("no channel selected");
    };

    let channel = &channels[index];
    log::info!("playing {}", channel.title);

    let cast = args.cast.map(|address| CastTarget { address });
    if let Some(target) = &cast {
        log::info!("casting to chromecast at {}", target.address);
    }
    let session = PlaybackSession::start(channel, cast.as_ref())
        .context("unable to launch vlc, is it installed and on PATH?")?;
    session.wait().await?;

    Ok(())
}
