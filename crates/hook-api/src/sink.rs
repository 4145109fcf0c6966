//! Console sink: one tracing line per captured webhook.

use hook_types::{CaptureEvent, CaptureSink};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl CaptureSink for TracingSink {
    fn captured(&self, event: &CaptureEvent) {
        tracing::info!(
            id = event.id,
            method = %event.method,
            path = %event.path,
            "[{}] Webhook received on: {} {}",
            event.timestamp,
            event.method,
            event.path
        );
    }
}
