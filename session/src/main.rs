use maze_session::{
    format_elapsed, seed_from_time, ClockToken, Difficulty, MazeSession, MazeSnapshot,
    MoveOutcome, ScoreLedger,
};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const MAX_SNAPSHOT_BYTES: u64 = 10_000_000;

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            if args.len() < 3 {
                eprintln!("Usage: {} generate <easy|hard> [--seed <n>] [output_file]", args[0]);
                std::process::exit(1);
            }

            let difficulty = parse_difficulty(&args[2]);
            let (seed, rest) = parse_seed(&args[3..]);
            let output_file = rest.first().map(|s| s.as_str());

            generate_command(difficulty, seed, output_file);
        }

        "show" => {
            if args.len() < 3 {
                eprintln!("Usage: {} show <snapshot_file>", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            show_command(&args[2]);
        }

        "play" => {
            // Difficulty is optional, so options may start right after the command
            let (difficulty, options) = match args.get(2) {
                Some(arg) if !arg.starts_with("--") => (parse_difficulty(arg), &args[3..]),
                _ => (Difficulty::default(), &args[2..]),
            };
            let (seed, _) = parse_seed(options);

            if let Err(e) = play_command(difficulty, seed) {
                eprintln!("❌ Error: {}", e);
                std::process::exit(1);
            }
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate <easy|hard> [--seed <n>] [output_file]");
    eprintln!("      Generate a maze and save its snapshot");
    eprintln!("      - --seed: Optional integer seed (default: derived from the clock)");
    eprintln!("      - output_file: Optional file to save the snapshot (JSON)");
    eprintln!("                     Defaults to: <seed>_maze.json");
    eprintln!();
    eprintln!("  show <snapshot_file>");
    eprintln!("      Render a saved snapshot");
    eprintln!();
    eprintln!("  play [easy|hard] [--seed <n>]");
    eprintln!("      Play interactively. Enter one command per line:");
    eprintln!("      - w/a/s/d (several per line allowed), up/right/down/left, or ArrowUp etc.");
    eprintln!("      - r: new maze, easy/hard: switch difficulty, q: quit");
    eprintln!();
    eprintln!("Scoring: easy = 2 points, hard = 5 points");
}

fn parse_difficulty(arg: &str) -> Difficulty {
    arg.parse().unwrap_or_else(|e| {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    })
}

/// Pull an optional `--seed <n>` off the front of `args`
fn parse_seed(args: &[String]) -> (u32, &[String]) {
    if args.first().map(String::as_str) != Some("--seed") {
        return (seed_from_time(), args);
    }

    let Some(value) = args.get(1) else {
        eprintln!("❌ Error: --seed requires a value");
        std::process::exit(1);
    };

    let seed = value.parse().unwrap_or_else(|_| {
        eprintln!("❌ Error: Invalid seed '{}'. Must be a non-negative integer.", value);
        std::process::exit(1);
    });
    (seed, &args[2..])
}

fn generate_command(difficulty: Difficulty, seed: u32, output_file: Option<&str>) {
    println!("📋 Generating maze");
    println!("  Difficulty: {}", difficulty);
    println!("  Seed: {}", seed);
    println!();

    let session = MazeSession::new(difficulty, seed, ScoreLedger::new());
    let snapshot = session.snapshot();

    print!("{}", snapshot.render_ascii());
    println!();

    let default_filename = format!("{}_maze.json", seed);
    let file_to_save = output_file.unwrap_or(&default_filename);

    match save_snapshot(&snapshot, file_to_save) {
        Ok(()) => {
            println!("💾 Maze saved to: {}", file_to_save);
            println!("   Use 'show {}' to render it again", file_to_save);
        }
        Err(e) => {
            eprintln!("❌ Error saving maze: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_command(snapshot_file: &str) {
    let snapshot = match load_snapshot(snapshot_file) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("❌ Error loading snapshot: {}", e);
            std::process::exit(1);
        }
    };

    println!("📦 Loaded maze (seed: {}, {})", snapshot.seed, snapshot.difficulty);
    println!("  Size: {}x{} cells", snapshot.width, snapshot.height);
    println!("  Player: {}", snapshot.player_position);
    println!("  Goal: {}", snapshot.goal_position);
    println!("  Time: {}", snapshot.elapsed_display());
    println!("  Solved: {}", if snapshot.is_won { "Yes ✓" } else { "No ✗" });
    println!();
    print!("{}", snapshot.render_ascii());
}

/// Everything the play loop reacts to, delivered on one channel so input
/// and clock ticks are handled strictly one after another
enum Event {
    Input(String),
    Tick(ClockToken),
    InputClosed,
}

/// Background thread sending one tick per second until cancelled
struct Ticker {
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    fn spawn(events: Sender<Event>, token: ClockToken) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(1));
            if flag.load(Ordering::Relaxed) || events.send(Event::Tick(token)).is_err() {
                break;
            }
        });

        Self { cancelled }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn play_command(difficulty: Difficulty, seed: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel();

    let input_tx = tx.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Event::InputClosed);
    });

    let mut session = MazeSession::new(difficulty, seed, ScoreLedger::new());
    let mut ticker = session.clock_token().map(|token| Ticker::spawn(tx.clone(), token));
    render(&session.snapshot())?;

    for event in rx {
        match event {
            Event::Tick(token) => {
                // Stale ticks from a replaced ticker are dropped by the session
                session.tick(token);
            }
            Event::InputClosed => break,
            Event::Input(line) => {
                let line = line.trim();
                match line {
                    "q" | "quit" => break,
                    "r" | "reset" => {
                        ticker = Some(Ticker::spawn(tx.clone(), session.reset()));
                        render(&session.snapshot())?;
                    }
                    "easy" | "hard" => {
                        let difficulty = parse_difficulty(line);
                        ticker = Some(Ticker::spawn(tx.clone(), session.new_session(difficulty)));
                        render(&session.snapshot())?;
                    }
                    _ => {
                        let keys = input_keys(line);
                        if keys.is_empty() {
                            println!("Unknown input '{}' (w/a/s/d, r, q)", line);
                            continue;
                        }
                        for key in keys {
                            if let MoveOutcome::Won { points, .. } = session.handle_key(key) {
                                ticker = None;
                                render(&session.snapshot())?;
                                println!(
                                    "🎊 Solved in {}! +{} points (total {})",
                                    format_elapsed(session.elapsed_seconds()),
                                    points,
                                    session.scores().total()
                                );
                                println!("   Enter 'r' to play again or 'q' to quit");
                                break;
                            }
                        }
                        if session.is_running() {
                            render(&session.snapshot())?;
                        }
                    }
                }
            }
        }
    }

    drop(ticker);
    println!("Final score: {}", session.scores().total());
    Ok(())
}

/// Translate a line of player input into arrow-key names
///
/// A line made only of `w`, `a`, `s`, `d` is a sequence of moves; a
/// direction word or an arrow-key name is a single move.
fn input_keys(line: &str) -> Vec<&'static str> {
    let wasd = |c: char| match c {
        'w' => Some("ArrowUp"),
        'd' => Some("ArrowRight"),
        's' => Some("ArrowDown"),
        'a' => Some("ArrowLeft"),
        _ => None,
    };

    if !line.is_empty() && line.chars().all(|c| wasd(c).is_some()) {
        return line.chars().filter_map(wasd).collect();
    }

    let key = match line.to_ascii_lowercase().as_str() {
        "up" | "arrowup" => "ArrowUp",
        "right" | "arrowright" => "ArrowRight",
        "down" | "arrowdown" => "ArrowDown",
        "left" | "arrowleft" => "ArrowLeft",
        _ => return Vec::new(),
    };
    vec![key]
}

fn render(snapshot: &MazeSnapshot) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out)?;
    write!(out, "{}", snapshot.render_ascii())?;
    writeln!(
        out,
        "{} | {} | time {} | open: {}",
        snapshot.difficulty,
        snapshot.player_position,
        snapshot.elapsed_display(),
        snapshot
            .open_directions()
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )?;
    out.flush()
}

fn save_snapshot(snapshot: &MazeSnapshot, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

fn load_snapshot(path: &str) -> Result<MazeSnapshot, Box<dyn std::error::Error>> {
    // Validate file size before reading (prevent loading gigabytes into memory)
    if fs::metadata(path)?.len() > MAX_SNAPSHOT_BYTES {
        return Err("Snapshot file is too large (max 10MB)".into());
    }

    let json = fs::read_to_string(path)?;
    let snapshot: MazeSnapshot = serde_json::from_str(&json)?;
    snapshot.validate()?;
    Ok(snapshot)
}
