//! Ordered playback fallback chain
//!
//! A clip is played by trying each `PlaybackStep` in turn until one succeeds.
//! The backend only has to say how a single step is attempted. Failures are
//! logged and absorbed here; callers never see an error.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future that need not be `Send` (browser futures never are)
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Playback strategies, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStep {
    /// Play an already decoded buffer
    CachedBuffer,
    /// Fetch the file, decode it, cache the buffer, play it
    FetchDecode,
    /// Play through a (reused) media element
    MediaElement,
    /// Fresh media element, errors ignored
    FireAndForget,
}

impl PlaybackStep {
    pub const ORDER: [PlaybackStep; 4] = [
        PlaybackStep::CachedBuffer,
        PlaybackStep::FetchDecode,
        PlaybackStep::MediaElement,
        PlaybackStep::FireAndForget,
    ];
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio context unavailable")]
    NoContext,
    #[error("no decoded buffer cached")]
    NotCached,
    #[error("fetch failed with status {0}")]
    Status(u16),
    #[error("{0}")]
    Js(String),
}

/// A backend able to attempt one playback step
pub trait ClipPlayer {
    fn attempt<'a>(
        &'a self,
        step: PlaybackStep,
        url: &'a str,
    ) -> LocalBoxFuture<'a, Result<(), PlaybackError>>;
}

/// Try every step in order. Returns the step that worked, or `None` if the
/// whole chain failed.
pub async fn play_with_fallback<P: ClipPlayer + ?Sized>(player: &P, url: &str) -> Option<PlaybackStep> {
    for step in PlaybackStep::ORDER {
        match player.attempt(step, url).await {
            Ok(()) => {
                log::debug!("Played {} via {:?}", url, step);
                return Some(step);
            }
            // A cache miss is the normal first-play path
            Err(PlaybackError::NotCached) => {}
            Err(e) => log::warn!("{:?} failed for {}: {}", step, url, e),
        }
    }
    log::warn!("All playback fallbacks failed for {}", url);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::task::{Context, Poll, Waker};

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = std::pin::pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(v) = fut.as_mut().poll(&mut cx) {
                return v;
            }
        }
    }

    /// Succeeds only on the listed steps and records what was tried
    struct FakePlayer {
        works: Vec<PlaybackStep>,
        tried: RefCell<Vec<PlaybackStep>>,
    }

    impl FakePlayer {
        fn new(works: &[PlaybackStep]) -> Self {
            Self {
                works: works.to_vec(),
                tried: RefCell::new(Vec::new()),
            }
        }
    }

    impl ClipPlayer for FakePlayer {
        fn attempt<'a>(
            &'a self,
            step: PlaybackStep,
            _url: &'a str,
        ) -> LocalBoxFuture<'a, Result<(), PlaybackError>> {
            self.tried.borrow_mut().push(step);
            let result = if self.works.contains(&step) {
                Ok(())
            } else if step == PlaybackStep::CachedBuffer {
                Err(PlaybackError::NotCached)
            } else {
                Err(PlaybackError::Js("boom".into()))
            };
            Box::pin(std::future::ready(result))
        }
    }

    #[test]
    fn test_cached_buffer_short_circuits() {
        let player = FakePlayer::new(&[PlaybackStep::CachedBuffer, PlaybackStep::FetchDecode]);
        let used = block_on(play_with_fallback(&player, "a.mp3"));
        assert_eq!(used, Some(PlaybackStep::CachedBuffer));
        assert_eq!(*player.tried.borrow(), vec![PlaybackStep::CachedBuffer]);
    }

    #[test]
    fn test_falls_through_in_order() {
        let player = FakePlayer::new(&[PlaybackStep::MediaElement]);
        let used = block_on(play_with_fallback(&player, "a.mp3"));
        assert_eq!(used, Some(PlaybackStep::MediaElement));
        assert_eq!(
            *player.tried.borrow(),
            vec![
                PlaybackStep::CachedBuffer,
                PlaybackStep::FetchDecode,
                PlaybackStep::MediaElement
            ]
        );
    }

    #[test]
    fn test_total_failure_is_absorbed() {
        let player = FakePlayer::new(&[]);
        assert_eq!(block_on(play_with_fallback(&player, "a.mp3")), None);
        assert_eq!(player.tried.borrow().len(), 4);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PlaybackError::Status(404).to_string(), "fetch failed with status 404");
        assert_eq!(PlaybackError::NoContext.to_string(), "audio context unavailable");
    }
}
