//! Animation capability handed to widgets by the host.
//!
//! The engine never drives timelines itself. A widget holding a handle calls
//! [`AnimationHandle::play`] or [`AnimationHandle::reverse`] at the moment a
//! decorative effect should start; timing is the handle's business.

use std::fmt;
use std::sync::Arc;

/// An imperative handle on one decorative animation.
pub trait AnimationHandle: Send + Sync {
    /// Runs the animation forward.
    fn play(&self);
    /// Pauses it where it is.
    fn pause(&self);
    /// Starts it again from the beginning.
    fn restart(&self);
    /// Runs it backward.
    fn reverse(&self);
}

/// Shared animation handle.
pub type SharedAnimation = Arc<dyn AnimationHandle>;

/// Debug placeholder so widgets holding handles can derive `Debug`.
pub(crate) struct HandleDebug<'a>(pub &'a Option<SharedAnimation>);

impl fmt::Debug for HandleDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Some(<animation>)"),
            None => f.write_str("None"),
        }
    }
}
