/// Fire-and-forget narration sink for player-facing messages.
///
/// Diagnostics go through `tracing`; this sink only carries the text a
/// presentation layer would show.
pub trait MessageLog {
    fn push(&mut self, message: String);
}

impl MessageLog for Vec<String> {
    fn push(&mut self, message: String) {
        Vec::push(self, message);
    }
}

/// Forwards narration to `tracing` at INFO level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl MessageLog for TracingLog {
    fn push(&mut self, message: String) {
        tracing::info!(target: "delve::narration", "{message}");
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl MessageLog for NullLog {
    fn push(&mut self, _message: String) {}
}
