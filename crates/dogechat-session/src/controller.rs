//! Chat controller: one user turn at a time, from submit to rendered reply.
//!
//! # Turn states
//!
//! ```text
//! Idle -> Validating -> Sending -> AwaitingReply -> Rendering -> Idle
//!              \
//!               -> Blocked   (unverified and out of free messages)
//! ```
//!
//! `Blocked` is only left through a successful verification. A day
//! rollover reopens the quota in the limiter, but a blocked controller
//! stays blocked until the wallet verifies.
//!
//! Input is disabled from `Sending` through `Rendering`. Every operation
//! takes `&mut self`, so at most one upstream call is in flight, and a
//! submit that arrives while input is disabled is rejected rather than
//! queued.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use dogechat_chain::error::WalletError;
use dogechat_chain::gate::{BalanceSource, VerificationGate};
use dogechat_chain::wallet::{WalletConnector, require_project_id};
use dogechat_completion::chat::{ChatBackend, ChatCompletionRequest};
use dogechat_completion::error::CompletionError;
use dogechat_completion::persona::{self, PersonaPolicy};
use dogechat_core::config::ChatConfig;
use dogechat_core::models::message::Message;
use dogechat_core::models::verification::VerificationStatus;
use dogechat_core::models::wallet::WalletSession;
use dogechat_storage::store::KeyValueStore;

use crate::clock::Clock;
use crate::conversation::Conversation;
use crate::error::SessionError;
use crate::limiter::RateLimiter;
use crate::view::{ChatView, Sender, StatusTone};

const UNLIMITED_INDICATOR: &str = "Unlimited Messages. such VIP. wow.";
const LIMIT_PLACEHOLDER: &str = "Message limit reached for free users...";
const DEFAULT_PLACEHOLDER: &str = "Say something, peasant...";

// ── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Validating,
    Sending,
    AwaitingReply,
    Rendering,
    Blocked,
}

/// What happened to a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input. Nothing happened.
    Ignored,
    /// Input was disabled (turn in flight or blocked).
    Rejected,
    /// Free quota exhausted; the controller is now blocked.
    LimitReached,
    /// Reply received and rendered.
    Replied,
    /// Upstream failed; an error line was rendered, history unchanged.
    Failed,
}

/// External capabilities the controller works through.
pub struct Collaborators {
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub backend: Arc<dyn ChatBackend>,
    pub balances: Arc<dyn BalanceSource>,
}

pub struct ChatController<V: ChatView> {
    config: ChatConfig,
    limiter: RateLimiter,
    conversation: Conversation,
    backend: Arc<dyn ChatBackend>,
    gate: VerificationGate,
    persona: PersonaPolicy,
    view: V,
    state: TurnState,
    input_enabled: bool,
    verification: VerificationStatus,
    wallet: Option<WalletSession>,
    rng: StdRng,
}

// ── Construction ─────────────────────────────────────────────────────────────

impl<V: ChatView> ChatController<V> {
    /// Build a controller and render the opening state (greeting, status,
    /// limit indicator).
    pub fn new(
        config: ChatConfig,
        collaborators: Collaborators,
        view: V,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let limiter = RateLimiter::new(
            collaborators.store,
            collaborators.clock,
            config.max_free_messages,
        );
        let gate = VerificationGate::new(collaborators.balances, config.chain.token_decimals);
        let conversation = Conversation::with_greeting(persona::GREETING, config.history_limit);

        let mut controller = Self {
            config,
            limiter,
            conversation,
            backend: collaborators.backend,
            gate,
            persona: PersonaPolicy::stfudoge()?,
            view,
            state: TurnState::Idle,
            input_enabled: true,
            verification: VerificationStatus::Unchecked,
            wallet: None,
            rng: StdRng::from_entropy(),
        };

        info!(session = %controller.conversation.id(), "chat session started");

        controller.view.render(Sender::Bot, persona::GREETING);
        controller
            .view
            .set_status(StatusTone::Neutral, "Connect wallet to verify your $STFU.");
        controller.view.set_placeholder(DEFAULT_PLACEHOLDER);
        controller.set_input_enabled(true);
        controller.refresh_limit_indicator()?;

        Ok(controller)
    }

    /// Replace the reply suffix policy.
    pub fn with_persona(mut self, persona: PersonaPolicy) -> Self {
        self.persona = persona;
        self
    }

    /// Make filler, denial, and meme choices reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

// ── Accessors ────────────────────────────────────────────────────────────────

impl<V: ChatView> ChatController<V> {
    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn verification(&self) -> &VerificationStatus {
        &self.verification
    }

    pub fn is_verified(&self) -> bool {
        self.verification.is_verified()
    }

    pub fn wallet(&self) -> Option<&WalletSession> {
        self.wallet.as_ref()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

// ── Chat turns ───────────────────────────────────────────────────────────────

impl<V: ChatView> ChatController<V> {
    /// Run one user turn.
    ///
    /// Storage failures abort the turn before anything is sent and are
    /// returned; upstream failures are rendered and reported as
    /// [`SubmitOutcome::Failed`].
    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        if !self.input_enabled || self.state != TurnState::Idle {
            return Ok(SubmitOutcome::Rejected);
        }

        let text = text.trim();
        if text.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        self.state = TurnState::Validating;
        let verified = self.verification.is_verified();

        if let Err(e) = self.admit(verified) {
            self.state = TurnState::Idle;
            self.view
                .render(Sender::System, &format!("Storage error: {e}. much fail. wow."));
            return Err(e);
        }
        if self.state == TurnState::Blocked {
            return Ok(SubmitOutcome::LimitReached);
        }

        // Sending
        self.state = TurnState::Sending;
        self.conversation.append(Message::user(text));
        self.view.render(Sender::User, text);
        self.set_input_enabled(false);

        let request = ChatCompletionRequest {
            model: self.config.model_for(verified).to_string(),
            messages: self
                .conversation
                .snapshot_for_upstream(&persona::system_prompt(verified)),
        };

        // AwaitingReply
        self.state = TurnState::AwaitingReply;
        info!(
            session = %self.conversation.id(),
            model = %request.model,
            messages = request.messages.len(),
            verified,
            "requesting reply"
        );
        let result = match tokio::time::timeout(
            self.config.reply_timeout(),
            self.backend.complete(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout(self.config.reply_timeout_secs)),
        };

        // Rendering
        self.state = TurnState::Rendering;
        let outcome = match result {
            Ok(response) => {
                let raw = response
                    .reply_text()
                    .unwrap_or_else(|| persona::EMPTY_REPLY.to_string());
                let reply = self.persona.enforce_suffix(&raw, &mut self.rng);

                self.conversation.append(Message::assistant(reply.clone()));
                self.view.render(Sender::Bot, &reply);

                if verified && self.rng.gen_bool(self.config.meme_chance) {
                    info!("meme placeholder triggered");
                    self.view
                        .render(Sender::BotMeme, &persona::meme_placeholder(text, &reply));
                }
                SubmitOutcome::Replied
            }
            Err(e) => {
                warn!(error = %e, "chat turn failed");
                self.view
                    .render(Sender::Bot, &persona::failure_line(&e.to_string()));
                SubmitOutcome::Failed
            }
        };

        self.set_input_enabled(true);
        self.state = TurnState::Idle;
        Ok(outcome)
    }

    /// Validating step: consult and charge the free quota.
    fn admit(&mut self, verified: bool) -> Result<(), SessionError> {
        if verified {
            self.view.set_limit_indicator(UNLIMITED_INDICATOR);
            return Ok(());
        }

        let check = self.limiter.check_limit()?;
        if check.limit_reached {
            info!(count = check.count, "free-tier limit reached");
            self.block();
            return Ok(());
        }

        self.limiter.increment()?;
        self.refresh_limit_indicator()?;
        Ok(())
    }

    fn block(&mut self) {
        let denial = persona::LIMIT_DENIALS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(persona::LIMIT_DENIALS[0]);
        self.view.render(Sender::Bot, denial);
        self.state = TurnState::Blocked;
        self.set_input_enabled(false);
        self.view.set_placeholder(LIMIT_PLACEHOLDER);
    }

    fn unblock(&mut self) {
        if self.state == TurnState::Blocked {
            self.state = TurnState::Idle;
            self.set_input_enabled(true);
            self.view.set_placeholder(DEFAULT_PLACEHOLDER);
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.view.set_input_enabled(enabled);
    }

    fn refresh_limit_indicator(&mut self) -> Result<(), SessionError> {
        if self.verification.is_verified() {
            self.view.set_limit_indicator(UNLIMITED_INDICATOR);
        } else {
            let remaining = self.limiter.remaining()?;
            self.view
                .set_limit_indicator(&format!("Messages remaining: {remaining}"));
        }
        Ok(())
    }
}

// ── Wallet & verification ────────────────────────────────────────────────────

impl<V: ChatView> ChatController<V> {
    /// Connect a wallet and run the verification gate for it.
    ///
    /// Connection failures drop any previous session and its verification.
    /// A failed balance check leaves the user unverified (fail-closed).
    pub async fn connect_wallet(
        &mut self,
        connector: &dyn WalletConnector,
    ) -> Result<&VerificationStatus, SessionError> {
        if let Err(e) = require_project_id(self.config.walletconnect_project_id.as_deref()) {
            warn!(error = %e, "wallet connection not configured");
            self.view.set_status(StatusTone::Denied, "Wallet init failed.");
            self.view.render(
                Sender::System,
                "Error initializing wallet connection. much fail. wow.",
            );
            return Ok(&self.verification);
        }

        self.view.set_status(StatusTone::Neutral, "Connecting...");

        match connector.connect().await {
            Ok(session) => {
                info!(address = %session.address, chain_id = session.chain_id, "wallet connected");
                self.wallet = Some(session);
                self.verify_wallet().await?;
            }
            Err(e) => {
                warn!(error = %e, "wallet connection failed");
                self.wallet = None;
                self.verification = VerificationStatus::Unchecked;
                match e {
                    WalletError::Declined(_) => {
                        self.view
                            .set_status(StatusTone::Neutral, "Wallet connection cancelled.");
                    }
                    WalletError::Unavailable(_) => {
                        self.view
                            .set_status(StatusTone::Denied, "Wallet connection failed.");
                        self.view.render(
                            Sender::System,
                            "Error: Wallet libraries not loaded. Please retry.",
                        );
                    }
                    WalletError::Config(_) => {
                        self.view.set_status(StatusTone::Denied, "Wallet init failed.");
                    }
                    WalletError::InvalidAddress(_) => {
                        self.view
                            .set_status(StatusTone::Denied, "Wallet connection failed.");
                    }
                }
                self.refresh_limit_indicator()?;
            }
        }

        Ok(&self.verification)
    }

    /// Re-run the balance check for the connected wallet.
    pub async fn verify_wallet(&mut self) -> Result<&VerificationStatus, SessionError> {
        let Some(session) = self.wallet.clone() else {
            self.verification = VerificationStatus::Unchecked;
            self.view.set_status(StatusTone::Neutral, "Connect wallet first.");
            self.refresh_limit_indicator()?;
            return Ok(&self.verification);
        };

        let symbol = self.config.chain.token_symbol.clone();
        self.verification = VerificationStatus::Checking;
        self.view.set_status(
            StatusTone::Neutral,
            &format!("Verifying {symbol} for {}...", session.short_address()),
        );

        self.verification = match self.gate.verify(&session.address).await {
            Ok(status) => status,
            Err(e) => {
                warn!(address = %session.address, error = %e, "balance check failed");
                VerificationStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match &self.verification {
            VerificationStatus::Verified { balance } => {
                let shown: String = balance.chars().take(6).collect();
                self.view.set_status(
                    StatusTone::Verified,
                    &format!(
                        "✅ STFUDoge Verified ({shown} {symbol}). Unlimited access granted. such wow."
                    ),
                );
                self.view.render(Sender::Bot, persona::VERIFIED_LINE);
                self.unblock();
            }
            VerificationStatus::Failed { .. } => {
                self.view
                    .set_status(StatusTone::Denied, "Error checking balance. Network issue?");
                self.view.render(Sender::Bot, persona::CHECK_FAILED_LINE);
            }
            _ => {
                self.verification = VerificationStatus::Denied;
                self.view.set_status(
                    StatusTone::Denied,
                    &format!("❌ No {symbol} found. Get some tokens, peasant."),
                );
                self.view.render(Sender::Bot, persona::DENIED_LINE);
            }
        }

        self.refresh_limit_indicator()?;
        Ok(&self.verification)
    }
}
