//! Application state — single-owner, main-thread only.
//!
//! All session state lives here: the resolved ticker, the latest quote
//! series, cached news + sentiment, the paper-trading ledger, and the
//! comparison selections. It is created at startup and dropped at exit;
//! nothing is persisted. The worker thread communicates via channels.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use tickerdeck_core::auth::Authenticator;
use tickerdeck_core::config::Config;
use tickerdeck_core::domain::QuoteSeries;
use tickerdeck_core::ledger::Ledger;
use tickerdeck_core::range::TimeRange;
use tickerdeck_core::sentiment::HeadlineSentiment;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Quote,
    News,
    Trading,
    Compare,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Quote => 0,
            Panel::News => 1,
            Panel::Trading => 2,
            Panel::Compare => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Quote),
            1 => Some(Panel::News),
            2 => Some(Panel::Trading),
            3 => Some(Panel::Compare),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Quote => "Quote",
            Panel::News => "News",
            Panel::Trading => "Trading",
            Panel::Compare => "Compare",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 5).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 4) % 5).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// Login form state, only relevant while the Login overlay is up.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus_password: bool,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Login,
    TickerEntry,
    ErrorHistory,
}

/// Quote panel state — the active ticker and its chart series.
#[derive(Debug, Default)]
pub struct QuotePanelState {
    /// Resolved symbol currently shown, if any.
    pub ticker: Option<String>,
    /// Set when regional resolution substituted a variant for the input.
    pub resolved_note: Option<String>,
    pub range: TimeRange,
    pub series: Option<QuoteSeries>,
    pub fetch_in_progress: bool,
    pub last_updated: Option<NaiveDateTime>,
}

/// News panel state — cached per ticker, invalidated on ticker change.
#[derive(Debug, Default)]
pub struct NewsPanelState {
    pub headlines: Option<Vec<String>>,
    pub sentiment: Option<Vec<HeadlineSentiment>>,
    pub fetch_in_progress: bool,
}

impl NewsPanelState {
    pub fn clear(&mut self) {
        self.headlines = None;
        self.sentiment = None;
        self.fetch_in_progress = false;
    }
}

/// Trading panel state — the ledger plus the quantity entry.
#[derive(Debug)]
pub struct TradingPanelState {
    pub ledger: Ledger,
    pub quantity: u32,
    /// Show the aggregate evaluation section (toggled by the Evaluate action).
    pub show_evaluation: bool,
}

impl TradingPanelState {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            ledger: Ledger::new(starting_cash),
            quantity: 1,
            show_evaluation: false,
        }
    }
}

/// Comparison panel state.
#[derive(Debug)]
pub struct ComparePanelState {
    /// Symbols offered in the multi-select.
    pub options: Vec<String>,
    pub selected: HashSet<String>,
    pub cursor: usize,
    /// Fetched series keyed by symbol.
    pub series: HashMap<String, QuoteSeries>,
    /// Fetched sentiment scores; `None` means no news was found.
    pub sentiment: HashMap<String, Option<f64>>,
    pub show_sentiment: bool,
    pub fetch_in_progress: bool,
}

impl ComparePanelState {
    pub fn new(options: Vec<String>, default_selected: &[String]) -> Self {
        let selected = default_selected
            .iter()
            .filter(|s| options.contains(s))
            .cloned()
            .collect();
        Self {
            options,
            selected,
            cursor: 0,
            series: HashMap::new(),
            sentiment: HashMap::new(),
            show_sentiment: false,
            fetch_in_progress: false,
        }
    }

    /// Selected symbols in option order, so chart colors are stable.
    pub fn selected_in_order(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|s| self.selected.contains(*s))
            .cloned()
            .collect()
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub quote: QuotePanelState,
    pub news: NewsPanelState,
    pub trading: TradingPanelState,
    pub compare: ComparePanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub ticker_input: String,
    pub login: LoginForm,

    // Collaborators
    pub config: Config,
    pub auth: Box<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: Box<dyn Authenticator>,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let overlay = if auth.login_required() {
            Overlay::Login
        } else {
            Overlay::None
        };
        let trading = TradingPanelState::new(config.starting_cash);
        let compare = ComparePanelState::new(
            config.comparison_symbols.clone(),
            &config.default_comparison,
        );
        Self {
            active_panel: Panel::Quote,
            running: true,
            quote: QuotePanelState::default(),
            news: NewsPanelState::default(),
            trading,
            compare,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay,
            ticker_input: String::new(),
            login: LoginForm::default(),
            config,
            auth,
        }
    }

    /// The price buys, sells and P/L are marked against: the most recent
    /// close of the active series.
    pub fn current_price(&self) -> Option<f64> {
        self.quote.series.as_ref().and_then(|s| s.last_price())
    }

    /// Switch the active ticker and invalidate everything derived from it.
    pub fn set_ticker(&mut self, symbol: String, resolved_from: Option<String>) {
        if self.quote.ticker.as_deref() != Some(symbol.as_str()) {
            self.news.clear();
        }
        self.quote.resolved_note = resolved_from.map(|from| format!("{from} resolved to {symbol}"));
        self.quote.ticker = Some(symbol);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
