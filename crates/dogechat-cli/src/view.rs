use std::io::Write;

use crossterm::style::{Color, Stylize, style};
use dogechat_core::models::theme::Theme;
use dogechat_session::view::{ChatView, Sender, StatusTone};

/// Line-oriented chat view writing to a terminal (or any writer).
///
/// Status and limit lines are only printed when they change, so repeated
/// refreshes from the controller do not spam the scrollback.
pub struct TerminalView<W: Write + Send> {
    out: W,
    theme: Theme,
    colored: bool,
    input_enabled: bool,
    status: String,
    limit_indicator: String,
    placeholder: String,
}

struct Palette {
    user: Color,
    bot: Color,
    system: Color,
    meme: Color,
    verified: Color,
    denied: Color,
    neutral: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            user: Color::Cyan,
            bot: Color::Yellow,
            system: Color::Red,
            meme: Color::Magenta,
            verified: Color::Green,
            denied: Color::Red,
            neutral: Color::Grey,
        },
        Theme::Light => Palette {
            user: Color::DarkBlue,
            bot: Color::DarkYellow,
            system: Color::DarkRed,
            meme: Color::DarkMagenta,
            verified: Color::DarkGreen,
            denied: Color::DarkRed,
            neutral: Color::DarkGrey,
        },
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, theme: Theme, colored: bool) -> Self {
        Self {
            out,
            theme,
            colored,
            input_enabled: true,
            status: String::new(),
            limit_indicator: String::new(),
            placeholder: String::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn limit_indicator(&self) -> &str {
        &self.limit_indicator
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Input prompt; shows the placeholder while input is disabled.
    pub fn prompt(&mut self) {
        let prompt = if self.input_enabled {
            "> ".to_string()
        } else {
            format!("({}) > ", self.placeholder)
        };
        if let Err(e) = write!(self.out, "{prompt}").and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }

    fn write_line(&mut self, label: &str, text: &str, color: Color) {
        let result = if self.colored {
            writeln!(self.out, "{} {text}", style(label).with(color).bold())
        } else {
            writeln!(self.out, "{label} {text}")
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn render(&mut self, sender: Sender, text: &str) {
        let colors = palette(self.theme);
        let (label, color) = match sender {
            Sender::User => ("you:", colors.user),
            Sender::Bot => ("STFUDoge:", colors.bot),
            Sender::System => ("system:", colors.system),
            Sender::BotMeme => ("STFUDoge [meme]:", colors.meme),
        };
        self.write_line(label, text, color);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_status(&mut self, tone: StatusTone, text: &str) {
        if self.status == text {
            return;
        }
        self.status = text.to_string();

        let colors = palette(self.theme);
        let color = match tone {
            StatusTone::Neutral => colors.neutral,
            StatusTone::Verified => colors.verified,
            StatusTone::Denied => colors.denied,
        };
        self.write_line("[status]", text, color);
    }

    fn set_limit_indicator(&mut self, text: &str) {
        if self.limit_indicator == text {
            return;
        }
        self.limit_indicator = text.to_string();
        let color = palette(self.theme).neutral;
        self.write_line("[limit]", text, color);
    }

    fn set_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }
}
