//! Rendering surface the controller drives.

/// Who a rendered line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    /// Out-of-character notices (configuration and library failures).
    System,
    /// Meme placeholder shown after some verified replies.
    BotMeme,
}

/// Colouring of the verification status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Verified,
    Denied,
}

/// The chat UI as seen by the controller.
pub trait ChatView: Send {
    fn render(&mut self, sender: Sender, text: &str);

    fn set_input_enabled(&mut self, enabled: bool);

    fn set_status(&mut self, tone: StatusTone, text: &str);

    fn set_limit_indicator(&mut self, text: &str);

    /// Hint shown in the empty input field.
    fn set_placeholder(&mut self, _text: &str) {}
}
