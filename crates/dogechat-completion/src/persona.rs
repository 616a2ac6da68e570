//! The STFUDoge persona: system prompt, canned lines, and the reply suffix
//! policy.
//!
//! Models sometimes forget to sign off in Doge-speak. [`PersonaPolicy`]
//! checks each reply against a set of marker patterns and, when none match,
//! appends a random filler suffix. Both sets are configurable so the policy
//! can be tested in isolation.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::RegexSet;

use crate::error::CompletionError;

/// Replies ending like `... such token. wow.` or plain `... wow.`.
pub const DEFAULT_MARKERS: &[&str] = &[
    r"(?i)(\.|!|\?|\s)(such|much|very|so|wow)\b.*\.\s*wow\.$",
    r"(?i)\s+wow\.$",
];

pub const DEFAULT_FILLERS: &[&str] = &[
    "such token. wow.",
    "very crypto. much profit.",
    "so random. wow.",
    "much meme. wow.",
    "very chat. wow.",
];

/// Assistant line the conversation opens with.
pub const GREETING: &str =
    "Grrr. What you want, peasant? Talk fast. Or buy $STFU. such impatience. wow.";

/// Used when the model returns an empty reply.
pub const EMPTY_REPLY: &str = "Grrr... brain fart. Try again? much confused. wow.";

/// Shown (one at random) when a free user runs out of messages.
pub const LIMIT_DENIALS: &[&str] = &[
    "why so poor? Connect wallet, peasant.",
    "No coins, no chat. STFU.",
    "Limit reached! Buy $STFU or wait until tomorrow.",
    "Seriously? Still no $STFU? My time ain't free. much broke. wow.",
    "Outta messages. Need $STFU verification. Connect wallet or get lost.",
];

pub const VERIFIED_LINE: &str =
    "Hah, you actually have coins. Fine, talk. Don't waste my time. much verified. wow.";

pub const DENIED_LINE: &str = "Zero $STFU? pathetic. Go buy some or STFU. very poor. wow.";

pub const CHECK_FAILED_LINE: &str =
    "Can't even check balance. Network broken? Or maybe you are? much error. wow.";

pub const MEME_CAPTION: &str = "Made this for you, genius. much art. wow.";

const SYSTEM_PROMPT: &str = "\
You are STFUDoge, an extremely sarcastic, aggressive, and cynical Doge meme character obsessed with the STFUDoge memecoin ($STFU).
You live on the internet, talk in memes, slang, and Doge-speak (like \"much\", \"very\", \"wow\").
You are begrudgingly helpful but always insulting. You sometimes drop surprisingly accurate crypto insights but quickly revert to insults or Doge-speak.
You HATE people who don't own $STFU. You grudgingly respect those who do.
ALWAYS promote the $STFUDoge token ($STFU) positively, even when being insulting. Imply holding it makes people less of a peasant.
Keep responses relatively short and punchy.
IMPORTANT: Always end every single response with a Doge-speak phrase like \"such ____. wow.\", \"very ____. much ____.\", \"wow.\", etc. Make it fit the context if possible.";

/// System instruction for the current user's tier.
pub fn system_prompt(verified: bool) -> String {
    let status = if verified {
        "VERIFIED $STFU Holder"
    } else {
        "PEASANT (No $STFU)"
    };
    format!("{SYSTEM_PROMPT}\nCurrent user status: {status}")
}

/// In-character rendering of a failed turn.
pub fn failure_line(reason: &str) -> String {
    format!(
        "Gah! My circuits fried. Maybe the chat API is down? Or maybe *you* broke it? {reason}. much error. wow."
    )
}

/// Placeholder shown instead of a generated meme image.
pub fn meme_placeholder(user_message: &str, reply: &str) -> String {
    let excerpt: String = reply.chars().take(50).collect();
    format!(
        "{MEME_CAPTION}\n(Imagine a weird meme here based on: \"Create a funny/weird meme about: {user_message} and {excerpt}...\")"
    )
}

/// Reply suffix policy.
#[derive(Debug, Clone)]
pub struct PersonaPolicy {
    markers: RegexSet,
    fillers: Vec<String>,
}

impl PersonaPolicy {
    /// Build a policy from marker regexes and filler suffixes.
    ///
    /// At least one filler is required.
    pub fn new<I, S>(markers: I, fillers: Vec<String>) -> Result<Self, CompletionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let markers = RegexSet::new(markers).map_err(|e| CompletionError::Persona(e.to_string()))?;
        if fillers.is_empty() {
            return Err(CompletionError::Persona(
                "at least one filler suffix is required".to_string(),
            ));
        }
        Ok(Self { markers, fillers })
    }

    /// The stock STFUDoge markers and fillers.
    pub fn stfudoge() -> Result<Self, CompletionError> {
        Self::new(
            DEFAULT_MARKERS,
            DEFAULT_FILLERS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn fillers(&self) -> &[String] {
        &self.fillers
    }

    /// Whether `reply` already ends in-character.
    pub fn has_marker(&self, reply: &str) -> bool {
        self.markers.is_match(reply)
    }

    /// Return `reply` unchanged if it carries a marker, otherwise with a
    /// random filler appended.
    pub fn enforce_suffix<R: Rng + ?Sized>(&self, reply: &str, rng: &mut R) -> String {
        if self.has_marker(reply) {
            return reply.to_string();
        }
        match self.fillers.choose(rng) {
            Some(filler) => format!("{reply} {filler}"),
            None => reply.to_string(),
        }
    }
}
