use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use feedcard::api::{ApiClient, PostService};
use feedcard::card::{ActionOutcome, CardOptions, PostCard};
use feedcard::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use feedcard::config::{self, ConfigManager};
use feedcard::input::{handle_key, KeyOutcome};
use feedcard::logging::{self, LogConfig};
use feedcard::{terminal, ui};

/// feedcard - one interactive post from the feed, in your terminal
#[derive(Parser)]
#[command(name = "feedcard")]
#[command(about = "Like, comment on, share or delete a single feed post")]
#[command(version)]
struct Cli {
    /// Post snapshot (JSON, as returned by the feed)
    #[arg(long, short)]
    post: PathBuf,

    /// Post service base URL
    #[arg(long, short, env = "FEEDCARD_SERVER_URL")]
    server: Option<String>,

    /// Bearer token; overrides the saved session's token
    #[arg(long, env = "FEEDCARD_TOKEN")]
    token: Option<String>,

    /// Link copied by the share action
    #[arg(long, env = "FEEDCARD_PAGE_URL")]
    page_url: Option<String>,

    /// Keep shared links in memory instead of the system clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so clap's `env` fallbacks can see it
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let config_manager = ConfigManager::new()?;
    let session = config_manager
        .load_session()?
        .context("No session found. Sign in through the feed first.")?;
    let token = cli.token.unwrap_or(session.token);
    let server_url = config_manager.determine_server_url(cli.server)?;
    let page_url = config_manager.determine_page_url(cli.page_url)?;
    let post = config::load_post_snapshot(&cli.post)?;

    log::info!(
        "Mounting post {} for {} against {}",
        post.id,
        session.user.username,
        server_url
    );

    let service: Arc<dyn PostService> = Arc::new(ApiClient::new(server_url, token));
    let mut clipboard: Box<dyn Clipboard> = if cli.no_clipboard {
        Box::new(MemoryClipboard::default())
    } else {
        Box::new(SystemClipboard)
    };

    let options = CardOptions {
        page_url,
        log: log_config,
        ..Default::default()
    };
    let mut post_card = PostCard::new(post, session.user, options);

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut post_card, service, clipboard.as_mut()).await;
    terminal::restore()?;

    if let Err(e) = &result {
        log::error!("feedcard exited with error: {:#}", e);
    }
    result
}

/// Event loop: apply finished requests, expire the share banner, draw, then
/// route at most one key press
async fn run(
    tui: &mut terminal::Tui,
    post_card: &mut PostCard,
    service: Arc<dyn PostService>,
    clipboard: &mut dyn Clipboard,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ActionOutcome>();

    loop {
        while let Ok(outcome) = rx.try_recv() {
            post_card.apply(outcome);
        }

        let now = Instant::now();
        post_card.clear_expired(now);
        tui.draw(|frame| ui::render(frame, post_card, now))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(post_card, key, clipboard, Instant::now()) {
            KeyOutcome::Continue => {}
            KeyOutcome::Quit => break,
            KeyOutcome::Dispatch(action) => {
                log::debug!("Dispatching {} request", action.name());
                let service = Arc::clone(&service);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = action.dispatch(service.as_ref()).await;
                    // The loop may already have exited; nothing left to update
                    let _ = tx.send(outcome);
                });
            }
        }
    }

    Ok(())
}
