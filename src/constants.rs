// Shell model
pub const SHELL_CAPACITIES: [u32; 7] = [2, 8, 18, 32, 32, 18, 8];
pub const SHELL_BASE_GAP: f32 = 1.4; // distance from nucleus surface to shell 0
pub const SHELL_SPACING: f32 = 1.05;
pub const SHELL_OCCUPANCY_SPREAD: f32 = 0.35;

// Nucleus sizing
pub const NUCLEUS_MIN_RADIUS: f32 = 0.6;
pub const NUCLEUS_RADIUS_PER_CBRT: f32 = 0.34;
pub const NUCLEUS_CORE_MIN_RADIUS: f32 = 0.7;
pub const NUCLEUS_LAYOUT_PER_CBRT: f32 = 0.33;
pub const NUCLEUS_LAYOUT_SHRINK: f32 = 0.75;

// Bohr shell orbits
pub const SHELL_TILT_BASE: f32 = 0.18;
pub const SHELL_TILT_STEP: f32 = 0.07;
pub const SHELL_TWIST_STEP: f32 = 0.28;
pub const SHELL_BASE_SPEED: f32 = 0.55;
pub const SHELL_SPEED_STEP: f32 = 0.22;
pub const SHELL_VERTICAL_AMPLITUDE: f32 = 0.075;
pub const SHELL_TRAIL_SEGMENTS: usize = 72;

// Rutherford orbits
pub const MIN_ORBIT_RADIUS: f32 = 4.0;
pub const MAX_ORBIT_RADIUS: f32 = 9.0;
pub const ORBIT_RADIUS_EXPONENT: f32 = 0.75;
pub const ORBIT_BASE_SPEED: f32 = 0.7;
pub const ORBIT_SPEED_FALLOFF: f32 = 1.6;
pub const ORBIT_TRAIL_SEGMENTS: usize = 96;
pub const RUTHERFORD_NUCLEUS_MIN_RADIUS: f32 = 0.55;
pub const RUTHERFORD_NUCLEUS_PER_CBRT: f32 = 0.18;

// Thomson / Dalton spheres
pub const MAX_ATOMIC_MASS: f32 = 250.0;
pub const SPHERE_MIN_RADIUS: f32 = 1.6;
pub const SPHERE_MAX_RADIUS: f32 = 3.2;
pub const THOMSON_ELECTRON_FILL: f32 = 0.78; // electrons stay inside this fraction of the sphere

// Periodic table placement
pub const PERIODIC_SPACING: f32 = 1.85;
pub const PERIODIC_CENTER_GROUP: f32 = 9.5;
pub const PERIODIC_CENTER_PERIOD: f32 = 4.0;

// Assembly explorer
pub const EXPLODE_MIN_MAGNITUDE: f32 = 0.15;
pub const EXPLODE_TRAVEL: f32 = 2.0;
pub const DEFAULT_MATERIAL_KEY: &str = "steel_default";
pub const DEBUG_MATERIAL_GUESS: &str = "steel_fastener_12_9";
pub const UNNAMED_MODEL: &str = "Model";
pub const PATH_SEPARATOR: &str = " / ";

/// Heatmap gradient used by the PCF overlay, low to high.
pub const PCF_HEATMAP_STOPS: [(f32, &str); 4] = [
    (0.0, "#2563eb"),
    (0.45, "#22c55e"),
    (0.70, "#f59e0b"),
    (1.0, "#ef4444"),
];

// Particle sizes handed to the renderer
pub const NUCLEON_RADIUS: f32 = 0.26;
pub const NUCLEUS_GLOW_SCALE: f32 = 1.3;
pub const NUCLEUS_GLOW_OPACITY: f32 = 0.12;
pub const BOHR_ELECTRON_RADIUS: f32 = 0.2;
pub const RUTHERFORD_ELECTRON_RADIUS: f32 = 0.18;
pub const THOMSON_ELECTRON_MIN_RADIUS: f32 = 0.16;
pub const THOMSON_ELECTRON_SCALE: f32 = 0.08;
pub const POSITIVE_SPHERE_OPACITY: f32 = 0.45;
