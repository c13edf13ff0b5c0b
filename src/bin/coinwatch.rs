//! Live price/volume dashboard for one CoinGecko coin.

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use coinwatch::prelude::*;
use coinwatch::tui::{self, TuiSink};

#[derive(Debug, Parser)]
#[command(name = "coinwatch", about = "Live CoinGecko price/volume ticker")]
struct Args {
    /// Quote currency for prices and volumes.
    #[arg(long, default_value = "usd")]
    vs_currency: VsCurrency,

    /// History window (1d, 7d or 30d).
    #[arg(long, default_value = "1d")]
    window: Window,

    /// Refresh cadence in seconds.
    #[arg(long, default_value_t = 30)]
    interval_secs: u64,

    /// Coin to select at startup instead of the catalogue's first entry.
    #[arg(long)]
    coin: Option<String>,

    /// CoinGecko pro API key (also read from COINGECKO_API_KEY).
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let api_key = args
        .api_key
        .or_else(|| std::env::var("COINGECKO_API_KEY").ok());

    let mut builder = GeckoClient::builder()
        .vs_currency(args.vs_currency)
        .window(args.window)
        .poll_interval(Duration::from_secs(args.interval_secs));
    if let Some(key) = &api_key {
        builder = builder.api_key(key);
    }
    let client = builder.build()?;

    let mut ticker = PriceTicker::bootstrap(&client, TuiSink::new())
        .await
        .context("loading the coin list failed")?;
    if let Some(coin) = args.coin {
        ticker.select_coin(CoinId::from(coin));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut ticker).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ticker: &mut PriceTicker<TuiSink>,
) -> anyhow::Result<()> {
    let mut keys = EventStream::new();
    let mut redraw = tokio::time::interval(Duration::from_millis(250));

    loop {
        tokio::select! {
            maybe_event = ticker.recv_event() => {
                if let Some(event) = maybe_event {
                    ticker.handle_event(event);
                }
            }
            maybe_key = keys.next() => {
                match maybe_key {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Left => cycle_selection(ticker, -1),
                            KeyCode::Right | KeyCode::Tab => cycle_selection(ticker, 1),
                            _ => {}
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                    _ => {}
                }
            }
            _ = redraw.tick() => {}
        }

        terminal.draw(|frame| tui::draw(frame, ticker.state(), ticker.sink().model()))?;
    }
}

/// Move the selection `step` entries through the catalogue, wrapping.
fn cycle_selection(ticker: &mut PriceTicker<TuiSink>, step: isize) {
    let coins = ticker.state().coins();
    if coins.is_empty() {
        return;
    }
    let current = ticker
        .state()
        .selected()
        .and_then(|sel| coins.iter().position(|c| &c.id == sel))
        .unwrap_or(0);
    let len = coins.len() as isize;
    let next = ((current as isize + step) % len + len) % len;
    let id = coins[next as usize].id.clone();
    ticker.select_coin(id);
}
