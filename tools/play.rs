//! Play: a terminal front end for RON game disks.
//!
//! Usage:
//!   play <disk.ron> [--config <engine.ron>] [--autoplay <steps>] [--seed <n>]
//!
//! At the prompt:
//!   <n>        take visible choice n (1-based)
//!   <enter>    accept the highlighted choice, or take the first one
//!   a / d      move the highlight left / right
//!   x          clear the highlight
//!   b          go back
//!   q          quit
//! On an input node the whole line is submitted instead.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cyoa_engine::core::autoplay::AutoPlayer;
use cyoa_engine::core::config::EngineConfig;
use cyoa_engine::core::engine::StoryEngine;
use cyoa_engine::core::keymap::Key;
use cyoa_engine::core::view::{Frame, Presentation, RecordingView, View};
use cyoa_engine::disk::DiskStory;

#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Play a RON game disk in the terminal")]
struct Args {
    /// Game disk to load.
    disk: PathBuf,

    /// Engine configuration (RON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play unattended for at most this many moves and print the route.
    #[arg(long)]
    autoplay: Option<usize>,

    /// RNG seed for --autoplay.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const MARKUP: &[(&str, &str)] = &[
    ("<br>", "\n"),
    ("<b>", "\x1b[1m"),
    ("</b>", "\x1b[22m"),
    ("<i>", "\x1b[3m"),
    ("</i>", "\x1b[23m"),
    ("<u>", "\x1b[4m"),
    ("</u>", "\x1b[24m"),
    ("<strike>", "\x1b[9m"),
    ("</strike>", "\x1b[29m"),
];

fn to_ansi(text: &str) -> String {
    MARKUP
        .iter()
        .fold(text.to_string(), |acc, (tag, code)| acc.replace(tag, code))
}

/// Draws frames to stdout with ANSI styling.
#[derive(Default)]
struct TerminalView {
    frame: Option<Frame>,
    highlight: Option<usize>,
}

impl TerminalView {
    fn draw(&self) {
        let Some(frame) = &self.frame else {
            return;
        };
        println!("{}\x1b[0m\n", to_ansi(&frame.text));
        match &frame.presentation {
            Presentation::Input => println!("  (type your answer)"),
            Presentation::Choices(labels) => {
                for (i, label) in labels.iter().enumerate() {
                    let marker = if self.highlight == Some(i) { '>' } else { ' ' };
                    println!("{} {}. {}", marker, i + 1, label);
                }
            }
        }
        if frame.show_back {
            println!("  [b] back");
        }
    }
}

impl View for TerminalView {
    fn set_title(&mut self, title: &str) {
        print!("\x1b]0;{}\x07", title);
        println!("== {} ==\n", title);
    }

    fn scroll_to_top(&mut self) {
        print!("\x1b[2J\x1b[H");
    }

    fn render(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
        self.highlight = None;
        self.draw();
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.highlight = index;
        println!();
        self.draw();
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let disk = match DiskStory::load_from_ron(&args.disk) {
        Ok(disk) => disk,
        Err(e) => {
            eprintln!("Error loading {}: {}", args.disk.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let config = match &args.config {
        Some(path) => match EngineConfig::load_from_ron(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    for (from, to) in disk.dangling_targets(&config.reserved_targets()) {
        tracing::warn!(from = %from, to = %to, "choice target is not on this disk");
    }

    match args.autoplay {
        Some(steps) => autoplay(disk, config, args.seed, steps),
        None => interactive(disk, config),
    }
}

fn autoplay(disk: DiskStory, config: EngineConfig, seed: u64, steps: usize) -> ExitCode {
    let mut engine = StoryEngine::with_config(disk, RecordingView::new(), config);
    engine.start();
    let route = AutoPlayer::new(seed).run(&mut engine, steps);
    println!("{}", route.join(" -> "));
    if let Some(frame) = engine.view().last_frame() {
        println!("\n{}\x1b[0m", to_ansi(&frame.text));
    }
    ExitCode::SUCCESS
}

fn interactive(disk: DiskStory, config: EngineConfig) -> ExitCode {
    let mut engine = StoryEngine::with_config(disk, TerminalView::default(), config);
    engine.start();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end_matches(['\r', '\n']);

        if engine.is_awaiting_input() {
            engine.submit(line);
            continue;
        }

        match line.trim() {
            "q" | "quit" => break,
            "" => {
                engine.handle_key(Key::Enter);
            }
            "b" | "back" => {
                engine.handle_key(Key::Backspace);
            }
            "x" => {
                engine.handle_key(Key::Escape);
            }
            "a" => {
                engine.handle_key(Key::Char('a'));
            }
            "d" => {
                engine.handle_key(Key::Char('d'));
            }
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if !engine.choose(n - 1) {
                        println!("No choice {}.", n);
                    }
                }
                _ => println!("Commands: <n>, <enter>, a, d, x, b, q"),
            },
        }
    }

    ExitCode::SUCCESS
}
