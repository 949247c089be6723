pub mod app;
pub mod event;
mod views;
mod widgets;

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self as ct_event, Event};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;

use agrofind_core::api::ApiClient;
use agrofind_core::config::AgrofindConfig;
use agrofind_core::model::HealthState;
use agrofind_core::present;
use agrofind_core::session::{FileSessionStore, SessionGate};

use self::app::{App, Screen};
use self::event::{AsyncAction, AsyncResult};

/// Entry point for the interactive TUI mode.
pub async fn run_tui(config: &AgrofindConfig) -> Result<()> {
    let api = ApiClient::from_config(&config.api).context("failed to create API client")?;
    let store = FileSessionStore::from_default().context("failed to open session store")?;
    let gate = SessionGate::new(Box::new(store));

    // Channels for async communication
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AsyncAction>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    let base_url_info = api.base_url().to_string();

    // Spawn async worker
    let worker_result_tx = result_tx.clone();
    tokio::spawn(async move {
        worker_loop(api, &mut action_rx, worker_result_tx).await;
    });

    let mut app = App::new(gate, config.default_category());

    // One health probe per authenticated session start
    if let Some(action) = app.initial_action() {
        action_tx.send(action)?;
    }

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut app, &action_tx, &mut result_rx, &base_url_info);
    ratatui::restore();
    result
}

fn run_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    action_tx: &mpsc::UnboundedSender<AsyncAction>,
    result_rx: &mut mpsc::UnboundedReceiver<AsyncResult>,
    base_url_info: &str,
) -> Result<()> {
    loop {
        // Draw
        terminal.draw(|frame| render(frame, app, base_url_info))?;

        // Poll for async results (non-blocking)
        while let Ok(result) = result_rx.try_recv() {
            app.handle_result(result);
        }

        // Poll for keyboard events (50ms timeout for responsive UI)
        if ct_event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = ct_event::read()? {
                if let Some(action) = app.handle_key(key) {
                    let _ = action_tx.send(action);
                }
            }
        }

        // Tick error timer
        app.tick_error();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App, base_url_info: &str) {
    let area = frame.area();

    match app.screen {
        Screen::Login => views::login::render(frame, area, base_url_info),
        Screen::Search => views::search::render(frame, app, area),
        Screen::Upload => views::upload::render(frame, app, area),
    }

    // Render error toast overlay if present
    if let Some(ref msg) = app.error_message {
        render_error_toast(frame, msg);
    }
}

fn render_error_toast(frame: &mut Frame, msg: &str) {
    use ratatui::{
        layout::{Constraint, Flex, Layout},
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph},
    };

    let area = frame.area();
    let [toast_area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(area);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(toast_area);

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(format!(" ✗ {msg}"))
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Erro "),
        );
    frame.render_widget(toast, toast_area);
}

/// Async worker: each action runs on its own task so a slow search never
/// blocks a health probe or an upload. Responses race back over the result
/// channel; the UI decides what is stale.
async fn worker_loop(
    api: ApiClient,
    action_rx: &mut mpsc::UnboundedReceiver<AsyncAction>,
    result_tx: mpsc::UnboundedSender<AsyncResult>,
) {
    while let Some(action) = action_rx.recv().await {
        let api = api.clone();
        let result_tx = result_tx.clone();
        tokio::spawn(async move {
            let result = perform(&api, action).await;
            let _ = result_tx.send(result);
        });
    }
}

async fn perform(api: &ApiClient, action: AsyncAction) -> AsyncResult {
    match action {
        AsyncAction::CheckHealth => match api.health().await {
            Ok(health) => AsyncResult::Health(HealthState::from_status(&health.status)),
            Err(e) => {
                // Degrades the indicator only; never surfaced as a blocking error
                tracing::warn!(error = %e, "health check failed");
                AsyncResult::Health(HealthState::Unhealthy)
            }
        },
        AsyncAction::Search { seq, request } => match api.search(&request).await {
            Ok(response) => AsyncResult::SearchDone { seq, response },
            Err(e) => AsyncResult::SearchFailed {
                seq,
                message: present::search_failure_message(&e),
            },
        },
        AsyncAction::Upload { file, category } => match api.upload_pdf(&file, category).await {
            Ok(response) => AsyncResult::UploadDone {
                message: present::upload_success_message(
                    response.message.as_deref(),
                    &file.filename,
                ),
            },
            Err(e) => AsyncResult::UploadFailed {
                message: present::upload_failure_message(&e),
            },
        },
    }
}
