#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, U256};
use dogechat_chain::error::ChainError;
use dogechat_chain::gate::BalanceSource;
use dogechat_completion::chat::{
    BoxFuture, ChatBackend, ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage,
};
use dogechat_completion::error::CompletionError;
use dogechat_core::config::ChatConfig;
use dogechat_session::clock::ManualClock;
use dogechat_session::controller::{ChatController, Collaborators};
use dogechat_session::view::{ChatView, Sender, StatusTone};
use dogechat_storage::memory::MemoryStore;
use jiff::civil::{Date, date};

pub const HOLDER: &str = "0x1234567890abcdef1234567890abcdef12345678";

pub fn day() -> Date {
    date(2024, 1, 1)
}

// ── View ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingView {
    pub lines: Vec<(Sender, String)>,
    pub input_enabled: bool,
    pub status: Option<(StatusTone, String)>,
    pub limit_indicator: String,
    pub placeholder: String,
}

impl RecordingView {
    pub fn last_line(&self) -> &(Sender, String) {
        self.lines.last().expect("at least one rendered line")
    }

    pub fn lines_from(&self, sender: Sender) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(s, _)| *s == sender)
            .map(|(_, t)| t.as_str())
            .collect()
    }
}

impl ChatView for RecordingView {
    fn render(&mut self, sender: Sender, text: &str) {
        self.lines.push((sender, text.to_string()));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_status(&mut self, tone: StatusTone, text: &str) {
        self.status = Some((tone, text.to_string()));
    }

    fn set_limit_indicator(&mut self, text: &str) {
        self.limit_indicator = text.to_string();
    }

    fn set_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }
}

// ── Backend ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(String),
    Fail { status: u16, message: String },
    Hang,
}

pub struct FakeBackend {
    pub behavior: Mutex<Behavior>,
    pub requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl FakeBackend {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            behavior: Mutex::new(Behavior::Reply(text.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn with(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior: Mutex::new(behavior),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn set(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ChatCompletionRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one request")
    }
}

impl ChatBackend for FakeBackend {
    fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'_, Result<ChatCompletionResponse, CompletionError>> {
        self.requests.lock().unwrap().push(request);
        let behavior = self.behavior.lock().unwrap().clone();
        Box::pin(async move {
            match behavior {
                Behavior::Reply(text) => Ok(ChatCompletionResponse {
                    choices: vec![Choice {
                        message: ChoiceMessage {
                            content: Some(text),
                        },
                    }],
                }),
                Behavior::Fail { status, message } => Err(CompletionError::Status { status, message }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(CompletionError::Transport("hung".to_string()))
                }
            }
        })
    }
}

// ── Balances ─────────────────────────────────────────────────────────────────

pub struct FakeBalances {
    pub balance: Mutex<Result<U256, String>>,
}

impl FakeBalances {
    pub fn holding(amount: u64) -> Arc<Self> {
        Arc::new(Self {
            balance: Mutex::new(Ok(U256::from(amount))),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            balance: Mutex::new(Err(reason.to_string())),
        })
    }

    pub fn set(&self, balance: Result<U256, String>) {
        *self.balance.lock().unwrap() = balance;
    }
}

impl BalanceSource for FakeBalances {
    fn balance_of(&self, _owner: Address) -> dogechat_chain::gate::BoxFuture<'_, Result<U256, ChainError>> {
        let result = self
            .balance
            .lock()
            .unwrap()
            .clone()
            .map_err(ChainError::Transport);
        Box::pin(async move { result })
    }
}

// ── Harness ──────────────────────────────────────────────────────────────────

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub backend: Arc<FakeBackend>,
    pub balances: Arc<FakeBalances>,
}

impl Harness {
    pub fn new(backend: Arc<FakeBackend>, balances: Arc<FakeBalances>) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            clock: Arc::new(ManualClock::new(day())),
            backend,
            balances,
        }
    }

    pub fn controller(&self, config: ChatConfig) -> ChatController<RecordingView> {
        ChatController::new(
            config,
            Collaborators {
                store: self.store.clone(),
                clock: self.clock.clone(),
                backend: self.backend.clone(),
                balances: self.balances.clone(),
            },
            RecordingView::default(),
        )
        .expect("controller should build")
        .with_rng_seed(42)
    }
}

pub fn config() -> ChatConfig {
    ChatConfig {
        max_free_messages: 3,
        walletconnect_project_id: Some("test-project".to_string()),
        meme_chance: 0.0,
        ..ChatConfig::default()
    }
}
