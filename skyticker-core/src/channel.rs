//! Double-buffered ticker message
//!
//! New text is written to `pending` at any time, but only becomes `active`
//! through [`MessageChannel::commit`], which the orchestrator calls when the
//! animator reports a safe boundary. The renderer only ever sees `active`,
//! so it never observes a half-written or mid-scroll swap.
//!
//! Producer and consumer run on the same thread; no locking is involved.

use core::fmt::{self, Write};

use heapless::String;

/// Hard upper bound on message length, in characters
pub const MESSAGE_CAPACITY: usize = 511;

/// Backing buffer size: room for [`MESSAGE_CAPACITY`] four-byte characters
pub const MESSAGE_BUFFER_LEN: usize = 2048;

/// Owned, bounded message text
pub type MessageText = String<MESSAGE_BUFFER_LEN>;

/// Publish/commit message slot
#[derive(Debug, Clone)]
pub struct MessageChannel {
    active: MessageText,
    pending: MessageText,
    pending_ready: bool,
    capacity: usize,
}

impl MessageChannel {
    /// Create a channel showing `initial`
    ///
    /// `capacity` is in characters and is clamped to [`MESSAGE_CAPACITY`].
    pub fn new(initial: &str, capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MESSAGE_CAPACITY);
        let mut active = MessageText::new();
        let _ = Bounded::new(&mut active, capacity).write_str(initial);
        Self {
            active,
            pending: MessageText::new(),
            pending_ready: false,
            capacity,
        }
    }

    /// The committed text; always a complete message
    pub fn active(&self) -> &str {
        &self.active
    }

    /// The published but not yet committed text
    pub fn pending(&self) -> Option<&str> {
        self.pending_ready.then_some(self.pending.as_str())
    }

    pub fn has_pending(&self) -> bool {
        self.pending_ready
    }

    /// Capacity in characters
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace the pending text, truncating to capacity
    ///
    /// A later publish before the next commit overwrites the earlier one.
    pub fn publish(&mut self, text: &str) {
        self.publish_fmt(format_args!("{}", text));
    }

    /// Format directly into the pending slot, truncating to capacity
    pub fn publish_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.pending.clear();
        let _ = Bounded::new(&mut self.pending, self.capacity).write_fmt(args);
        self.pending_ready = true;
    }

    /// Move pending text into the active slot
    ///
    /// Returns `true` if `active` changed. Without an intervening
    /// [`publish`](Self::publish) a second call is a no-op.
    pub fn commit(&mut self) -> bool {
        if !self.pending_ready {
            return false;
        }
        core::mem::swap(&mut self.active, &mut self.pending);
        self.pending.clear();
        self.pending_ready = false;
        true
    }
}

/// Writer that silently stops at a character limit or buffer end
struct Bounded<'a> {
    buf: &'a mut MessageText,
    chars: usize,
    limit: usize,
}

impl<'a> Bounded<'a> {
    fn new(buf: &'a mut MessageText, limit: usize) -> Self {
        let chars = buf.chars().count();
        Self { buf, chars, limit }
    }
}

impl Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.chars >= self.limit || self.buf.push(ch).is_err() {
                self.chars = self.limit;
                break;
            }
            self.chars += 1;
        }
        // Truncation is not an error; formatting continues to completion
        Ok(())
    }
}
