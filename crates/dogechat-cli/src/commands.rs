/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, submitted to the chat.
    Say(String),
    /// `/connect [address]`. No address behaves like a cancelled prompt.
    Connect(Option<String>),
    Theme,
    Moon,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        match name.to_ascii_lowercase().as_str() {
            "connect" => Command::Connect(parts.next().map(str::to_string)),
            "theme" => Command::Theme,
            "moon" => Command::Moon,
            "status" => Command::Status,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        }
    }
}

pub const HELP: &str = "\
/connect <address>  verify a wallet's $STFU balance (needs walletconnect_project_id in the config)
/theme              toggle light/dark
/moon               much moon
/status             show verification and remaining messages
/quit               leave";
