//! Core types and traits for the webhook logger.
//!
//! A captured request is normalized into a [`NewRecord`], turned into an immutable [`Record`] by a
//! [`CaptureStore`], announced to a [`CaptureSink`] and displayed through a [`Renderer`].

mod record;
mod traits;

#[cfg(feature = "test-util")]
mod mock;

#[cfg(feature = "test-util")]
pub use mock::RecordingSink;
pub use record::*;
pub use traits::*;
