//! Poll/reply loop over a chat transport.

use crate::registry::egrul_client::RegistryLookup;
use crate::service::reply_service::ReplyService;
use crate::transport::telegram::{ChatTransport, TransportResult};
use log::{info, warn};
use std::time::Duration;

/// Pause after a failed poll or send before polling again.
pub const DEFAULT_ERROR_PAUSE: Duration = Duration::from_secs(3);

/// Chat bot: polls the transport and answers each text message in order.
pub struct Bot<T: ChatTransport, L: RegistryLookup> {
    transport: T,
    replies: ReplyService<L>,
    offset: Option<i64>,
    error_pause: Duration,
}

impl<T: ChatTransport, L: RegistryLookup> Bot<T, L> {
    pub fn new(transport: T, replies: ReplyService<L>) -> Self {
        Self {
            transport,
            replies,
            offset: None,
            error_pause: DEFAULT_ERROR_PAUSE,
        }
    }

    pub fn with_error_pause(mut self, error_pause: Duration) -> Self {
        self.error_pause = error_pause;
        self
    }

    /// Next update id to request; `None` before the first update.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Polls once and replies to every text message in the batch.
    ///
    /// Returns the number of replies sent. The offset advances past each
    /// update before its reply is sent, so a failed send is not retried.
    ///
    /// # Errors
    /// - Returns the first poll or send failure; later updates of the batch
    ///   are picked up by the next poll.
    pub fn run_once(&mut self) -> TransportResult<usize> {
        let updates = self.transport.poll(self.offset)?;
        let mut sent = 0;
        for update in updates {
            self.offset = Some(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };
            let reply = self.replies.reply(&message.text);
            self.transport.send(message.reply_to, &reply)?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Runs the poll loop until the process exits.
    pub fn run(&mut self) -> ! {
        info!("event=bot_start module=bot status=ok");
        loop {
            if let Err(err) = self.run_once() {
                warn!(
                    "event=bot_iteration module=bot status=error error={err} pause_ms={}",
                    self.error_pause.as_millis()
                );
                std::thread::sleep(self.error_pause);
            }
        }
    }
}
