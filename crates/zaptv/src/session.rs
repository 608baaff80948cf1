use std::{ffi::OsStr, future::Future, process::Stdio};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::{Child, ChildStderr, ChildStdout, Command},
    sync::oneshot,
};

use crate::{
    error::{ZapError, ZapResult},
    playlist::Channel,
};

/// Name of the player executable resolved on `PATH`. No fallback player is
/// attempted when it is missing.
pub const PLAYER_BIN: &str = "vlc";

const CAST_SOUT: &str = "#chromecast";

/// Secondary playback sink the player streams to instead of local output.
#[derive(Debug, Clone)]
pub struct CastTarget {
    /// Network address of the chromecast sink.
    pub address: String,
}

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The player exited on its own.
    Completed,
    /// The session was interrupted and the player was killed.
    Killed,
}

/// A running player process together with its output supervisor.
///
/// The child handle is owned exclusively by the session and only ever acted
/// upon from the flow that consumes it with [`PlaybackSession::wait`]; the
/// supervisor task only reads the output pipes.
pub struct PlaybackSession {
    child: Child,
    done: oneshot::Receiver<()>,
}

impl PlaybackSession {
    /// Resolves the player on `PATH` and launches it for `channel`.
    pub fn start(channel: &Channel, cast: Option<&CastTarget>) -> ZapResult<Self> {
        let player = which::which(PLAYER_BIN)?;
        Self::start_with_player(player, channel, cast)
    }

    /// Launches `player` for `channel` and spawns the output supervisor.
    pub fn start_with_player(
        player: impl AsRef<OsStr>,
        channel: &Channel,
        cast: Option<&CastTarget>,
    ) -> ZapResult<Self> {
        let mut child = Command::new(player)
            .args(player_args(channel, cast))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (done_tx, done) = oneshot::channel();
        tokio::spawn(pump_output(stdout, stderr, done_tx));

        Ok(Self { child, done })
    }

    /// Supervises the session until the player exits or the process receives
    /// an interrupt, whichever comes first.
    ///
    /// On interrupt exactly one kill request is issued; a kill failure is
    /// unrecoverable. The session is consumed either way.
    pub async fn wait(self) -> ZapResult<PlaybackEnd> {
        self.wait_until(shutdown_signal()).await
    }

    async fn wait_until(self, interrupt: impl Future<Output = ()>) -> ZapResult<PlaybackEnd> {
        let Self { mut child, mut done } = self;
        tokio::select! {
            _ = &mut done => {
                let status = child.wait().await?;
                tracing::info!("player exited: {status}");
                Ok(PlaybackEnd::Completed)
            }
            _ = interrupt => {
                child.kill().await.map_err(ZapError::KillError)?;
                tracing::info!("player killed");
                Ok(PlaybackEnd::Killed)
            }
        }
    }
}

fn player_args(channel: &Channel, cast: Option<&CastTarget>) -> Vec<String> {
    let mut args = vec![channel.url.clone()];
    if let Some(target) = cast {
        args.extend([
            "--sout".to_string(),
            CAST_SOUT.to_string(),
            "--sout-chromecast-ip".to_string(),
            target.address.clone(),
        ]);
    }
    args
}

/// Drains the child's combined output, then signals completion exactly once.
///
/// Both pipes reach EOF only once the player has exited, so the completion
/// signal never precedes the exit.
async fn pump_output(
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    done: oneshot::Sender<()>,
) {
    let stdout = async {
        if let Some(stdout) = stdout {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                tracing::info!("[{PLAYER_BIN}] {line}");
            }
        }
    };
    let stderr = async {
        if let Some(stderr) = stderr {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                tracing::info!("[{PLAYER_BIN}] {line}");
            }
        }
    };
    tokio::join!(stdout, stderr);

    // The receiver is gone when the session was interrupted first.
    let _ = done.send(());
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            log::warn!("unable to listen for SIGTERM: {e}");
            tokio::signal::ctrl_c().await.unwrap();
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.unwrap();
}
