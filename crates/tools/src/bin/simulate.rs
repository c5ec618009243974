use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use warren_core::{Direction, GameEvent, RunOutcome, Session};
use warren_tools::config::WarrenConfig;
use warren_tools::render::{Marker, render_map};

#[derive(Parser)]
#[command(author, version, about = "Run a headless session with a random-walking player", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u64,
    /// Seconds of simulated time per tick
    #[arg(long, default_value_t = 0.05)]
    dt: f32,
    #[arg(short, long)]
    verbose: bool,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn main() -> Result<()> {
    let args = Args::parse();
    warren_tools::init_logging(args.verbose);

    let config = WarrenConfig::load_or_default(args.config.as_deref())?;
    let mut session = Session::generate(&config.dungeon, &config.session, args.seed)
        .with_context(|| format!("Dungeon generation failed for seed {}", args.seed))?;
    session.subscribe(|event: &GameEvent| debug!(?event, "event"));
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Simulating seed {} for at most {} ticks...", args.seed, args.ticks);
    while session.current_tick() < args.ticks && session.outcome() == RunOutcome::Running {
        let input = Some(choose(&mut rng, &Direction::ALL));
        let report = session.tick(args.dt, input);

        let graph = session.graph();
        if graph.get(report.player_room).is_none() || graph.get(report.monster_room).is_none() {
            bail!("Invariant failed: agent outside the graph at tick {}", report.tick);
        }
        if session.collected() > session.total_collectibles() {
            bail!("Invariant failed: collected more shards than exist at tick {}", report.tick);
        }
        if report.events.contains(&GameEvent::ExitsOpened) {
            info!(tick = report.tick, "exits opened");
        }
    }

    let markers = [
        Marker { room: session.player().room(), glyph: 'P' },
        Marker { room: session.monster().room(), glyph: 'M' },
    ];
    print!("{}", render_map(session.graph(), &markers));
    println!();
    println!("Outcome: {:?} after {} ticks", session.outcome(), session.current_tick());
    println!("Shards: {}/{}", session.collected(), session.total_collectibles());
    println!("Monster state: {:?}", session.monster().state());

    Ok(())
}
