//! Simulation constants and tuning parameters.
//!
//! All motion/heat rates are per-tick quantities at the fixed tick rate;
//! cooldowns are in simulation seconds.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Arena width in world units.
pub const ARENA_WIDTH: f64 = 800.0;

/// Arena height in world units.
pub const ARENA_HEIGHT: f64 = 600.0;

// --- Ship geometry ---

/// Ship hull width.
pub const SHIP_WIDTH: f64 = 20.0;

/// Ship hull length (nose to stern).
pub const SHIP_LENGTH: f64 = 30.0;

/// Approximate collision radius (half the hull length).
pub const SHIP_RADIUS: f64 = SHIP_LENGTH / 2.0;

// --- Ship handling ---

/// Hull rotation rate (radians per tick).
pub const ROTATION_SPEED: f64 = 0.05;

/// Turret rotation rate (radians per tick) — turret turns faster than the hull.
pub const TURRET_ROTATION_SPEED: f64 = 0.08;

/// Speed gained per thrust invocation.
pub const ACCELERATION: f64 = 0.1;

/// Multiplicative friction applied to speed each tick.
pub const FRICTION: f64 = 0.98;

/// Speeds below this magnitude snap to zero to avoid drift.
pub const SPEED_EPSILON: f64 = 0.01;

/// Maximum scalar speed without overburn.
pub const MAX_SPEED: f64 = 5.0;

/// Brake factor applied while reversing against forward motion.
pub const BRAKE_FACTOR: f64 = 0.9;

/// Constant reverse speed once forward motion has stopped.
pub const REVERSE_SPEED: f64 = 0.5;

// --- Health & heat ---

/// Maximum (and starting) hull health.
pub const MAX_HEALTH: f64 = 100.0;

/// Heat capacity; reaching it triggers reactor shutdown.
pub const MAX_HEAT: f64 = 100.0;

/// Heat dissipated per tick.
pub const HEAT_DISSIPATION_PER_TICK: f64 = 0.2;

/// Heat generated by firing the cannon.
pub const HEAT_PER_SHOT: f64 = 15.0;

/// Shutdown clears once heat drops below this fraction of MAX_HEAT.
/// The hysteresis band prevents flickering in and out of shutdown.
pub const SHUTDOWN_RECOVERY_FRACTION: f64 = 0.7;

// --- Overburn ---

/// Max speed multiplier while overburning.
pub const OVERBURN_SPEED_MULTIPLIER: f64 = 1.5;

/// Extra heat per thrust invocation while overburning.
pub const OVERBURN_HEAT_PER_TICK: f64 = 0.5;

/// Damage multiplier on bullets fired while overburning.
pub const OVERBURN_DAMAGE_MULTIPLIER: f64 = 1.5;

// --- Bullets ---

/// Bullet travel per tick.
pub const BULLET_SPEED: f64 = 7.0;

/// Bullet collision radius.
pub const BULLET_RADIUS: f64 = 3.0;

/// Base damage of a bullet impact (before the damage multiplier).
pub const BULLET_DAMAGE: f64 = 10.0;

/// Minimum seconds between player shots.
pub const PLAYER_SHOT_COOLDOWN_SECS: f64 = 0.2;

/// Minimum seconds between script-commanded shots.
/// Deliberately longer than the player's cooldown.
pub const SCRIPT_SHOT_COOLDOWN_SECS: f64 = 0.5;

// --- Ramming ---

/// Flat damage both ships take on hull-to-hull contact.
pub const RAM_BASE_DAMAGE: f64 = 5.0;

/// Extra ram damage per unit of the faster ship's speed (floored).
pub const RAM_SPEED_DAMAGE_FACTOR: f64 = 2.0;

/// Fraction of the other ship's speed kept in the bounce exchange.
/// Lossy by design; this is not real momentum transfer.
pub const BOUNCE_SPEED_TRANSFER: f64 = 0.5;

/// Speed retained after clamping against an arena wall.
pub const WALL_SPEED_FACTOR: f64 = 0.5;

// --- Explosions ---

/// Visual radius an explosion starts at.
pub const EXPLOSION_INITIAL_RADIUS: f64 = 5.0;

/// Radius within which an explosion deals area damage.
pub const EXPLOSION_DAMAGE_RADIUS: f64 = 60.0;

/// Damage at the center of an explosion, falling off linearly with range.
pub const EXPLOSION_MAX_DAMAGE: f64 = 20.0;

/// Radial push applied to ships in the damage radius, scaled by proximity.
pub const EXPLOSION_PUSH_FORCE: f64 = 5.0;

/// Hull-to-hull collision explosion: visual radius and duration in ticks.
pub const COLLISION_EXPLOSION_RADIUS: f64 = 20.0;
pub const COLLISION_EXPLOSION_TICKS: u32 = 15;

/// Bullet impact explosion.
pub const IMPACT_EXPLOSION_RADIUS: f64 = 15.0;
pub const IMPACT_EXPLOSION_TICKS: u32 = 20;

/// Ship destruction explosion.
pub const DESTRUCTION_EXPLOSION_RADIUS: f64 = 60.0;
pub const DESTRUCTION_EXPLOSION_TICKS: u32 = 45;

// --- Particles ---

/// Particles spawned per ship-hit burst.
pub const HIT_BURST_COUNT: usize = 8;

/// Particle speed range (units per tick).
pub const PARTICLE_MIN_SPEED: f64 = 1.0;
pub const PARTICLE_SPEED_SPREAD: f64 = 2.0;

/// Particle lifetime range (ticks).
pub const PARTICLE_MIN_LIFETIME: u32 = 10;
pub const PARTICLE_LIFETIME_SPREAD: u32 = 15;

/// Particle radius range.
pub const PARTICLE_MIN_RADIUS: f64 = 1.0;
pub const PARTICLE_RADIUS_SPREAD: f64 = 2.0;

/// Particle hue range (degrees, orange band).
pub const PARTICLE_MIN_HUE: f64 = 30.0;
pub const PARTICLE_HUE_SPREAD: f64 = 30.0;

// --- Sensor ---

/// Half-angle of the turret scan cone (±45° around turret heading).
pub const SCAN_CONE_HALF_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Visual radius of the rendered scan cone. Detection itself is unbounded.
pub const SCAN_CONE_RADIUS: f64 = 200.0;

// --- Match flow ---

/// Ticks between the roster dropping to one ship and the match halting,
/// so the final explosion can animate (~1 second).
pub const WIN_DELAY_TICKS: u64 = 60;
