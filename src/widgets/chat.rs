/// Opening message shown before the visitor types anything.
pub const BOT_GREETING: &str =
    "Olá! Gostaria de saber como a Lucidium.ai pode automatizar processos para sua empresa?";
/// Canned answer to every visitor message.
pub const BOT_REPLY: &str = "Obrigado pelo seu interesse! Vamos criar uma automação \
     personalizada para sua necessidade. Um de nossos especialistas entrará em contato em breve.";
pub const BOT_REPLY_DELAY_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub at_ms: u64,
}

/// The floating chat bubble: a toggle, a transcript and scripted bot replies.
#[derive(Clone, Debug)]
pub struct FloatingChat {
    open: bool,
    messages: Vec<ChatMessage>,
    next_id: u64,
    replies_due: Vec<u64>,
}

impl FloatingChat {
    /// Closed chat holding the greeting.
    pub fn new(now_ms: u64) -> Self {
        let mut chat = Self {
            open: false,
            messages: Vec::new(),
            next_id: 1,
            replies_due: Vec::new(),
        };
        chat.push(Sender::Bot, BOT_GREETING.to_owned(), now_ms);
        chat
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the window. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending_replies(&self) -> usize {
        self.replies_due.len()
    }

    /// Append a visitor message and schedule the bot's answer. Blank input is ignored.
    pub fn send(&mut self, text: &str, now_ms: u64) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.push(Sender::User, text.to_owned(), now_ms);
        self.replies_due.push(now_ms + BOT_REPLY_DELAY_MS);
        Some(id)
    }

    /// Deliver replies that are due. Returns how many arrived.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let (due, later): (Vec<u64>, Vec<u64>) = std::mem::take(&mut self.replies_due)
            .into_iter()
            .partition(|&at| at <= now_ms);
        self.replies_due = later;
        for &at in &due {
            self.push(Sender::Bot, BOT_REPLY.to_owned(), at);
        }
        due.len()
    }

    fn push(&mut self, sender: Sender, content: String, at_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            content,
            sender,
            at_ms,
        });
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/chat.rs"]
mod tests;
