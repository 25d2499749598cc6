use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotionError {
    #[error("a carousel needs at least one slide")]
    EmptyCarousel,

    #[error("slide {index} is out of range for a carousel of {len}")]
    SlideOutOfRange { index: usize, len: usize },

    #[error("background scroll is already locked by another overlay")]
    ScrollLockHeld,
}
