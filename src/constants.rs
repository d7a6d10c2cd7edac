// Board geometry and gameplay tuning. All fixed at build time; only the
// tick rate and render fps are runtime-tunable (env vars, see main.rs).

pub const TILE_SIZE: f32 = 40.0;
pub const GRID_W: usize = 20;
pub const GRID_H: usize = 15;

pub const ROBOT_SPEED: f32 = 4.0;
pub const MONSTER_SPEED: f32 = 3.0;

pub const ROBOT_START: (usize, usize) = (1, 1);
pub const MONSTER_START: (usize, usize) = (7, 7);

pub const COINS_PLACED: usize = 10;
pub const COINS_REQUIRED: u32 = 4;
pub const CHASE_RADIUS: usize = 5;

pub const CELL_W: usize = 2;
pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_RENDER_FPS: u64 = 120;
pub const INPUT_HOLD_MS: u64 = 160;
