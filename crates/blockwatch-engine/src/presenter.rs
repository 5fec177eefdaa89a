//! [`Presenter`] that writes one JSON object per line.

use std::io::{self, Write};

use blockwatch_history::Presenter;
use blockwatch_types::{ActorId, CellPos};
use tracing::warn;

use crate::protocol::Outbound;

/// Writes [`Outbound`] lines to any byte sink, flushing after each one.
///
/// Write failures are logged and dropped; the tracker never sees them.
#[derive(Debug)]
pub struct JsonLinePresenter<W> {
    out: W,
}

impl<W: Write> JsonLinePresenter<W> {
    /// Wrap `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying sink.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, outbound: &Outbound<'_>) {
        let result = serde_json::to_writer(&mut self.out, outbound)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());
        if let Err(error) = result {
            warn!(%error, "failed to write outbound line");
        }
    }
}

impl<W: Write> Presenter for JsonLinePresenter<W> {
    fn send_message(&mut self, actor: ActorId, message: &str) {
        self.emit(&Outbound::Message {
            actor,
            text: message,
        });
    }

    fn place_effect(&mut self, actor: ActorId, cell: CellPos) {
        self.emit(&Outbound::Effect { actor, cell });
    }
}
