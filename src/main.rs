use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tokio::time::Instant;

use turnsync::config::Config;
use turnsync::games::combat::{CombatAction, CombatReducer, CombatState};
use turnsync::games::explorer::{ExplorerAction, ExplorerReducer, ExplorerState};
use turnsync::games::tictactoe::{TicTacToeAction, TicTacToeReducer, TicTacToeState};
use turnsync::games::GameKind;
use turnsync::logging::init_tracing;
use turnsync::middleware::{ActionJournal, TurnAdvance};
use turnsync::mvi::Reducer;
use turnsync::rate_limit::RateLimitConfig;
use turnsync::store::{Middleware, Snapshot, Store};
use turnsync::turn::{TurnAction, TurnState};
use turnsync::view::TurnView;

const JOURNAL_CAPACITY: usize = 256;

/// Play a headless turn-based match between bots, each acting through its
/// own rate-limited view of the shared store.
#[derive(Debug, Parser)]
#[command(name = "turnsync", version)]
struct Args {
    /// Config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Game to play: tictactoe, explorer or combat
    #[arg(long)]
    game: Option<GameKind>,

    /// Number of player turns to play
    #[arg(long)]
    turns: Option<u32>,

    /// Rate limit bucket capacity
    #[arg(long)]
    count: Option<u32>,

    /// Rate limit replenishment window in milliseconds
    #[arg(long)]
    window_ms: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let path = args.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    apply_overrides(&mut config, &args);
    config.validate().context("invalid command line overrides")?;

    init_tracing(&config.logging.filter)?;

    let turns = config.demo.turns;
    let limit = config.rate_limit;
    match config.demo.game {
        GameKind::TicTacToe => {
            run::<TicTacToeReducer>(TicTacToeState::default(), limit, turns, args.json, |s, _| {
                s.open_cells()
                    .first()
                    .map(|&(row, col)| TicTacToeAction::Select { row, col })
            })
            .await
        }
        GameKind::Explorer => {
            run::<ExplorerReducer>(ExplorerState::default(), limit, turns, args.json, |s, turn| {
                let options = s.open_neighbors(s.current_player());
                if options.is_empty() {
                    return None;
                }
                let (x, y) = options[turn as usize % options.len()];
                Some(ExplorerAction::Move { x, y })
            })
            .await
        }
        GameKind::Combat => {
            run::<CombatReducer>(CombatState::default(), limit, turns, args.json, |s, _| {
                s.hand(s.current_player())
                    .first()
                    .map(|card| CombatAction::UseCard { card: card.id })
            })
            .await
        }
    }
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(game) = args.game {
        config.demo.game = game;
    }
    if let Some(turns) = args.turns {
        config.demo.turns = turns;
    }
    if let Some(count) = args.count {
        config.rate_limit.count = count;
    }
    if let Some(window_ms) = args.window_ms {
        config.rate_limit.window_ms = window_ms;
    }
}

/// Seat one bot per player plus a spectator, then play `turns` turns.
async fn run<R>(
    initial: R::State,
    limit: RateLimitConfig,
    turns: u32,
    json: bool,
    choose: fn(&R::State, u32) -> Option<R::Action>,
) -> anyhow::Result<()>
where
    R: Reducer,
    R::State: TurnState + Serialize,
    R::Action: TurnAction,
{
    let journal = ActionJournal::new(JOURNAL_CAPACITY);
    let middleware: Vec<Arc<dyn Middleware<R>>> =
        vec![Arc::new(journal.clone()), Arc::new(TurnAdvance)];
    let store = Store::<R>::with_middleware(initial, middleware);

    let players = store.get_state().player_count();
    let views = (0..players)
        .map(|player| TurnView::attach(&store, limit, Some(player)))
        .collect::<Result<Vec<_>, _>>()?;
    let spectator = TurnView::spectate(&store, limit)?;

    tokio::select! {
        played = play(&store, &views, turns, choose) => played?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    spectator.wait_synced().await;
    let last = spectator.value();
    tracing::info!(
        version = last.version(),
        dispatched = journal.len(),
        "Match finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(last.state())?);
    }
    Ok(())
}

async fn play<R>(
    store: &Store<R>,
    views: &[TurnView<R>],
    turns: u32,
    choose: fn(&R::State, u32) -> Option<R::Action>,
) -> anyhow::Result<()>
where
    R: Reducer,
    R::State: TurnState,
    R::Action: TurnAction,
{
    for turn in 0..turns {
        let player = store.get_state().current_player();
        let view = views
            .get(player)
            .with_context(|| format!("no view seated for player {player}"))?;

        let waiting = Instant::now();
        view.wait_actionable().await?;
        let latest: Snapshot<R::State> = view.latest();

        let Some(action) = choose(latest.state(), turn) else {
            tracing::info!(turn, player, "No moves left");
            break;
        };
        let played = view.act(action)?;
        tracing::info!(
            turn,
            player,
            waited_ms = waiting.elapsed().as_millis() as u64,
            version = played.version(),
            "Turn played"
        );
    }
    Ok(())
}
