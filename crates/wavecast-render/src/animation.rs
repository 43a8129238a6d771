//! Owned, cancellable frame loops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::renderer::SeriesRenderer;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Animating,
    Stopped,
}

/// Handle to a running waveform animation.
///
/// The loop redraws `surface` every `interval` until [`stop`](Self::stop) is
/// called or the handle is dropped. Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct AnimationHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
    frames: Arc<AtomicU64>,
}

impl AnimationHandle {
    pub fn spawn<S>(mut renderer: SeriesRenderer, surface: Arc<Mutex<S>>, interval: Duration) -> Self
    where
        S: Surface + 'static,
    {
        let token = CancellationToken::new();
        let frames = Arc::new(AtomicU64::new(0));
        let metric = renderer.view().metric();

        let task = tokio::spawn({
            let token = token.clone();
            let frames = frames.clone();
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                tracing::debug!("{} animation started", metric.label());

                loop {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        _ = ticker.tick() => {
                            renderer.draw_frame(&mut *surface.lock());
                            frames.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }

                tracing::debug!("{} animation stopped", metric.label());
            }
        });

        Self {
            token,
            task: Some(task),
            frames,
        }
    }

    /// Request the loop to end. No frame starts after this returns.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Stop and wait for the loop to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Animation task ended abnormally: {}", e);
            }
        }
    }

    pub fn state(&self) -> LoopState {
        let finished = self.task.as_ref().map_or(true, JoinHandle::is_finished);
        if self.token.is_cancelled() || finished {
            LoopState::Stopped
        } else {
            LoopState::Animating
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
