use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

mod components;
mod constants;
mod game;
mod level;
mod monster;
mod player;

use components::{Dir, Mover, Pos};
use constants::{
    CELL_W, COINS_REQUIRED, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS, GRID_H, GRID_W, INPUT_HOLD_MS,
    TILE_SIZE,
};
use game::{Game, Outcome};
use level::Tile;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Robot,
    Monster,
    Wall,
    Empty,
    Coin,
    Door,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new() -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                GRID_W * GRID_H
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    if !show_splash(stdout)? {
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    let mut game = Game::new(&mut rng);
    let mut renderer = Renderer::new();
    let mut last_tick = Instant::now();
    let mut last_seen: [Option<Instant>; 4] = [None, None, None, None];
    let mut last_pressed: Option<Dir> = None;
    let (tick_ms, render_fps) = read_speed_settings();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if key.code == KeyCode::Char('q') {
                            return Ok(());
                        }
                        if let Some(dir) = dir_for_key(key.code) {
                            last_seen[idx_for_dir(dir)] = Some(Instant::now());
                            last_pressed = Some(dir);
                        }
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            last_tick = Instant::now();
            let intent = active_dir_recent(&last_seen, last_pressed);
            let outcome = game.advance_tick(intent, &mut rng);
            render(stdout, &game, &mut renderer, tick_ms)?;
            if outcome != Outcome::InProgress {
                show_outro(stdout, &game, tick_ms, outcome == Outcome::Victory)?;
                return Ok(());
            }
        } else {
            render(stdout, &game, &mut renderer, tick_ms)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}

fn active_dir_recent(last_seen: &[Option<Instant>; 4], last_pressed: Option<Dir>) -> Option<Dir> {
    let now = Instant::now();
    if let Some(dir) = last_pressed {
        if let Some(t) = last_seen[idx_for_dir(dir)] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                return Some(dir);
            }
        }
    }
    let mut best: Option<(Dir, Instant)> = None;
    for (idx, dir) in [Dir::Up, Dir::Down, Dir::Left, Dir::Right].iter().enumerate() {
        if let Some(t) = last_seen[idx] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                match best {
                    None => best = Some((*dir, t)),
                    Some((_, bt)) if t > bt => best = Some((*dir, t)),
                    _ => {}
                }
            }
        }
    }
    best.map(|(dir, _)| dir)
}

fn idx_for_dir(dir: Dir) -> usize {
    match dir {
        Dir::Up => 0,
        Dir::Down => 1,
        Dir::Left => 2,
        Dir::Right => 3,
    }
}

// The grid cell the sprite currently looks closest to; mid-transit the
// sprite snaps to whichever cell its pixel position is more than halfway
// into, which is how interpolation shows up at terminal granularity.
fn sprite_cell(mover: &Mover) -> Pos {
    Pos {
        x: (mover.pixel.0 / TILE_SIZE).round() as usize,
        y: (mover.pixel.1 / TILE_SIZE).round() as usize,
    }
}

fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer, tick_ms: u64) -> io::Result<()> {
    let needed_h = (GRID_H + 2) as u16;
    let needed_w = (GRID_W * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let secs = game.ticks * tick_ms / 1000;
    let hud = format!(
        "Coins: {}/{}  Time: {}s  (q to quit)",
        game.robot.coins_collected, COINS_REQUIRED, secs
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let robot_cell = sprite_cell(&game.robot.mover);
    let monster_cell = sprite_cell(&game.monster.mover);
    for y in 0..GRID_H {
        for x in 0..GRID_W {
            let pos = Pos { x, y };
            let cell = cell_for(game, pos, robot_cell, monster_cell);
            let idx = y * GRID_W + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn cell_for(game: &Game, pos: Pos, robot_cell: Pos, monster_cell: Pos) -> Cell {
    if pos == monster_cell {
        return Cell {
            glyph: Glyph::Monster,
            color: Color::Red,
        };
    }
    if pos == robot_cell {
        return Cell {
            glyph: Glyph::Robot,
            color: Color::Yellow,
        };
    }
    match game.maze.tile(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::DarkGrey,
        },
        Tile::Empty => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
        Tile::Coin => Cell {
            glyph: Glyph::Coin,
            color: Color::Yellow,
        },
        Tile::Door => Cell {
            glyph: Glyph::Door,
            color: Color::Cyan,
        },
    }
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let (text, color) = match cell.glyph {
        Glyph::Robot => ("🤖", cell.color),
        Glyph::Monster => ("👹", cell.color),
        Glyph::Wall => ("██", cell.color),
        Glyph::Empty => ("  ", cell.color),
        Glyph::Coin => ("● ", cell.color),
        Glyph::Door => ("🚪", cell.color),
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn print_centered(stdout: &mut Stdout, row: u16, text: &str, color: Color) -> io::Result<()> {
    let (term_w, _) = terminal::size()?;
    let w = UnicodeWidthStr::width(text) as u16;
    let col = term_w.saturating_sub(w) / 2;
    stdout.queue(MoveTo(col, row))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Title card and instructions; returns false if the player quits here.
fn show_splash(stdout: &mut Stdout) -> io::Result<bool> {
    stdout.queue(Clear(ClearType::All))?;
    let (_, term_h) = terminal::size()?;
    let mut row = term_h / 6;

    print_centered(stdout, row, "-= Maze Runner: The Great Escape =-", Color::Cyan)?;
    row += 2;
    print_centered(stdout, row, "🤖  Robot: collect coins and escape!", Color::White)?;
    row += 1;
    print_centered(stdout, row, "👹  Monster: don't get caught!", Color::Red)?;
    row += 2;
    print_centered(stdout, row, "How to Play", Color::Cyan)?;
    row += 2;
    print_centered(stdout, row, "Move with the arrow keys (or hjkl).", Color::White)?;
    row += 1;
    print_centered(stdout, row, "Avoid the monster, or it will catch you!", Color::White)?;
    row += 1;
    print_centered(
        stdout,
        row,
        "Collect at least 4 coins before reaching the door!",
        Color::White,
    )?;
    row += 2;
    print_centered(stdout, row, "Press any key to start (q to quit)...", Color::Yellow)?;
    stdout.flush()?;

    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code != KeyCode::Char('q'));
                }
            }
        }
    }
}

fn show_outro(stdout: &mut Stdout, game: &Game, tick_ms: u64, victory: bool) -> io::Result<()> {
    stdout.queue(Clear(ClearType::All))?;
    let (_, term_h) = terminal::size()?;
    let mut row = term_h / 4;

    print_centered(stdout, row, "Game Over", Color::Cyan)?;
    row += 2;
    if victory {
        print_centered(stdout, row, "You Win!", Color::Green)?;
    } else {
        print_centered(stdout, row, "You Lose!", Color::Red)?;
    }
    row += 2;
    let coins = format!("Coins Collected: {}", game.robot.coins_collected);
    print_centered(stdout, row, &coins, Color::White)?;
    row += 1;
    let time = format!("Time Taken: {} seconds", game.ticks * tick_ms / 1000);
    print_centered(stdout, row, &time, Color::White)?;
    row += 2;
    print_centered(stdout, row, "Press any key to quit.", Color::Yellow)?;
    stdout.flush()?;

    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}
