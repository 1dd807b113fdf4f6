//! Terminal UI for walangpasok that shows suspension announcements, weather and news per city.

mod app;
mod input;
mod ui;

use std::{fs::OpenOptions, io, sync::Arc, sync::Mutex, time::Duration as StdDuration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use walangpasok_core::{
    config::{Config, LogConfig},
    directory::CityDirectory,
    refresh::{RefreshScheduler, RefreshUpdate},
    service::WalangPasokService,
};
use walangpasok_provider_newsapi::NewsApiClient;
use walangpasok_provider_openweather::OpenWeatherClient;

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; report the outcome once logging is up
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env().context("reading configuration")?;
    init_tracing(&config.log)?;
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "could not load environment file"),
    }

    // HTTP + service setup
    let client = Client::builder()
        .user_agent("walangpasok/0.1")
        .timeout(config.http_timeout)
        .build()?;

    let mut weather = OpenWeatherClient::new(client.clone(), config.weather.api_key.clone());
    if let Some(base_url) = &config.weather.base_url {
        weather = weather.with_base_url(base_url.as_str());
    }
    let mut news = NewsApiClient::new(client, config.news.api_key.clone());
    if let Some(base_url) = &config.news.base_url {
        news = news.with_base_url(base_url.as_str());
    }

    let service = Arc::new(WalangPasokService::new(
        Arc::new(CityDirectory::philippines()),
        Arc::new(weather),
        Arc::new(news),
    ));
    let (scheduler, updates) = RefreshScheduler::new(Arc::clone(&service), config.refresh);

    // App state
    let app = App::new(service, scheduler);
    info!(cities = app.cities.len(), "starting terminal ui");

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, updates).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Send log output to a file; the terminal belongs to the UI.
fn init_tracing(log: &LogConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.file)
        .with_context(|| format!("opening log file {}", log.file.display()))?;
    let filter = EnvFilter::try_new(&log.filter)
        .with_context(|| format!("parsing log filter {:?}", log.filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut updates: UnboundedReceiver<RefreshUpdate>,
) -> Result<()> {
    loop {
        // Apply whatever finished since the last frame; stale results are dropped by the app.
        while let Ok(update) = updates.try_recv() {
            app.apply(update);
        }

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::SelectCity => app.select_current_city(),
                Action::Refresh => app.refresh_current_screen(),
                Action::BackToCities => app.back_to_cities(),
            }
        }
    }

    info!("terminal ui closed");
    Ok(())
}
