//! Interrupt-to-channel funnel
//!
//! A single background task listens for user interrupts and pushes one
//! [`ShutdownToken`] per interrupt onto a bounded channel. Up to
//! [`SHUTDOWN_BUFFER_DEPTH`] tokens queue while nobody is reading; past that
//! the listener waits for the consumer instead of dropping interrupts.
//!
//! The funnel lives until the process exits. Commands that care about
//! cancellation read from the [`ShutdownChannel`]; nothing is force-stopped.

use async_trait::async_trait;
use std::io;
use tokio::sync::mpsc;
use tracing::debug;

/// Tokens buffered before the listener blocks
pub const SHUTDOWN_BUFFER_DEPTH: usize = 4;

/// "An interrupt occurred." Carries no other information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownToken;

/// Source of raw interrupt notifications
#[async_trait]
pub trait InterruptSource: Send + 'static {
    /// Waits for the next interrupt; `None` once no more can arrive.
    async fn recv(&mut self) -> Option<()>;
}

/// The platform's user-interrupt signal (SIGINT / Ctrl+C)
pub struct OsInterrupt {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
}

impl OsInterrupt {
    /// Installs the handler. Must be called inside a Tokio runtime.
    pub fn install() -> io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                signal: signal(SignalKind::interrupt())?,
            })
        }

        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }
}

#[async_trait]
impl InterruptSource for OsInterrupt {
    async fn recv(&mut self) -> Option<()> {
        #[cfg(unix)]
        {
            self.signal.recv().await
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok()
        }
    }
}

/// Consumer end of the funnel
#[derive(Debug)]
pub struct ShutdownChannel {
    rx: mpsc::Receiver<ShutdownToken>,
}

impl ShutdownChannel {
    /// Wraps an existing receiver; tokens sent on its sender are delivered
    /// exactly as interrupts would be.
    pub fn new(rx: mpsc::Receiver<ShutdownToken>) -> Self {
        Self { rx }
    }

    /// Waits for the next token. Returns `None` only if the listener has
    /// stopped, which happens when its interrupt source is exhausted.
    pub async fn recv(&mut self) -> Option<ShutdownToken> {
        self.rx.recv().await
    }

    /// Takes a queued token without waiting
    pub fn try_recv(&mut self) -> Option<ShutdownToken> {
        self.rx.try_recv().ok()
    }
}

pub struct ShutdownFunnel;

impl ShutdownFunnel {
    /// Starts listening for OS interrupts
    pub fn start() -> io::Result<ShutdownChannel> {
        Ok(Self::start_with(OsInterrupt::install()?))
    }

    /// Starts forwarding interrupts from an arbitrary source
    pub fn start_with<S: InterruptSource>(source: S) -> ShutdownChannel {
        let (tx, rx) = mpsc::channel(SHUTDOWN_BUFFER_DEPTH);
        tokio::spawn(forward(source, tx));
        ShutdownChannel { rx }
    }
}

async fn forward<S: InterruptSource>(mut source: S, tx: mpsc::Sender<ShutdownToken>) {
    while source.recv().await.is_some() {
        debug!(queued = SHUTDOWN_BUFFER_DEPTH - tx.capacity(), "Interrupt received");
        if tx.send(ShutdownToken).await.is_err() {
            debug!("Shutdown channel closed, interrupt listener exiting");
            return;
        }
    }
    debug!("Interrupt source exhausted");
}
