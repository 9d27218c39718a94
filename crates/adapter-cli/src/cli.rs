//! Command line options and the stdin event pump

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use embeddable_adapter::logging::{parse_log_level, setup_logging, LoggingConfig};
use embeddable_adapter::memory::{MemoryWidget, WidgetModel};
use embeddable_adapter::runtime::{self, AdapterEvent, AdapterHandle};
use embeddable_adapter::state::{DndStatus, TelephonyStatus, UserStatus};
use embeddable_adapter::transport::JsonLinesWindow;
use embeddable_adapter::{Adapter, AdapterConfig, AdapterDeps, CallSession};

/// Run the widget adapter over JSON lines
#[derive(Debug, Parser)]
#[command(name = "embeddable-adapter", version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Wrap each output line as {"targetOrigin", "data"}
    #[arg(long)]
    pub envelope: bool,

    /// Start with the user logged in
    #[arg(long)]
    pub logged_in: bool,

    /// Region used for number normalization
    #[arg(long, default_value = "US")]
    pub country_code: String,

    /// Default area code for local numbers
    #[arg(long, default_value = "")]
    pub area_code: String,

    /// Widget locale, overriding the configuration file
    #[arg(long)]
    pub locale: Option<String>,
}

/// Partial update of the in-memory widget state
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    pub logged_in: Option<bool>,
    pub telephony_status: Option<TelephonyStatus>,
    pub user_status: Option<UserStatus>,
    pub dnd_status: Option<DndStatus>,
    pub locale: Option<String>,
    pub call_idle: Option<bool>,
    pub ring_session_id: Option<String>,
    pub active_session_id: Option<String>,
    pub sessions: Option<Vec<CallSession>>,
}

impl StatePatch {
    fn apply(self, model: &mut WidgetModel) {
        if let Some(v) = self.logged_in {
            model.logged_in = v;
        }
        if let Some(v) = self.telephony_status {
            model.telephony_status = Some(v);
        }
        if let Some(v) = self.user_status {
            model.user_status = Some(v);
        }
        if let Some(v) = self.dnd_status {
            model.dnd_status = Some(v);
        }
        if let Some(v) = self.locale {
            model.locale = v;
        }
        if let Some(v) = self.call_idle {
            model.call_idle = v;
        }
        if let Some(v) = self.ring_session_id {
            model.ring_session_id = Some(v).filter(|id| !id.is_empty());
        }
        if let Some(v) = self.active_session_id {
            model.active_session_id = Some(v).filter(|id| !id.is_empty());
        }
        if let Some(v) = self.sessions {
            model.sessions = v;
        }
    }
}

/// One line of input
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum InputLine {
    /// A window message from the host frame
    Message { data: Value },
    /// Widget state changed
    State(StatePatch),
    Ring { session: CallSession },
    Start { session: CallSession },
    End { session: CallSession },
}

impl Cli {
    pub async fn execute(self) -> anyhow::Result<()> {
        let mut logging = LoggingConfig::new(parse_log_level(&self.log_level)?);
        if self.json_logs {
            logging = logging.with_json();
        }
        setup_logging(logging)?;

        let mut config = match &self.config {
            Some(path) => AdapterConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AdapterConfig::default().with_env_overrides(),
        };
        if let Some(locale) = &self.locale {
            config = config.with_locale(locale.clone());
        }

        let widget = Arc::new(MemoryWidget::with_model(WidgetModel {
            logged_in: self.logged_in,
            country_code: self.country_code.clone(),
            area_code: self.area_code.clone(),
            locale: config.locale.clone(),
            ..Default::default()
        }));
        let host = if self.envelope {
            JsonLinesWindow::with_envelope(std::io::stdout())
        } else {
            JsonLinesWindow::new(std::io::stdout())
        };
        let deps = AdapterDeps {
            host: Arc::new(host),
            ..widget.deps()
        };

        info!(prefix = %config.prefix, "starting embeddable adapter v{}", embeddable_adapter::VERSION);
        let adapter = Adapter::new(config, deps);
        let (handle, rx) = runtime::channel(runtime::DEFAULT_QUEUE_CAPACITY);
        let event_loop = tokio::spawn(runtime::run(adapter, rx));

        pump_stdin(&handle, &widget).await?;
        drop(handle);

        let adapter = event_loop.await.context("adapter event loop panicked")?;
        info!(tracked_sessions = adapter.sessions().len(), "input closed");
        Ok(())
    }
}

/// Forward stdin lines to the adapter until EOF
async fn pump_stdin(handle: &AdapterHandle, widget: &MemoryWidget) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let input: InputLine = match serde_json::from_str(&line) {
            Ok(input) => input,
            Err(e) => {
                warn!("skipping unreadable input line: {}", e);
                continue;
            }
        };
        if !handle.send(to_event(input, widget)).await {
            break;
        }
    }
    Ok(())
}

/// State patches are applied to the widget right away; the adapter sees
/// them on the next state change it processes.
fn to_event(input: InputLine, widget: &MemoryWidget) -> AdapterEvent {
    match input {
        InputLine::Message { data } => AdapterEvent::Message(data),
        InputLine::State(patch) => {
            widget.update(|model| patch.apply(model));
            AdapterEvent::StateChanged
        }
        InputLine::Ring { session } => AdapterEvent::CallRing(session),
        InputLine::Start { session } => AdapterEvent::CallStart(session),
        InputLine::End { session } => AdapterEvent::CallEnd(session),
    }
}
