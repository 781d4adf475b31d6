//! Small time-driven widgets that sit next to the animation. Callers pass the clock in.

mod chat;
mod typewriter;

pub use chat::{BOT_GREETING, BOT_REPLY, BOT_REPLY_DELAY_MS, ChatMessage, FloatingChat, Sender};
pub use typewriter::{Typewriter, TypewriterFrame};
