/// Scene, scroll and rain tuning constants.
///
/// These constants express intended behavior (falloff shape, smoothing
/// rates, tick cadence) and keep magic numbers out of the animation code.

// DOM wiring
pub const SKILLS_CONTAINER_ID: &str = "skills-container";
pub const SKILLS_CANVAS_ID: &str = "skills-canvas";
pub const RAIN_CANVAS_ID: &str = "rain-canvas";
pub const LOADING_OVERLAY_ID: &str = "loading-overlay";
pub const LOADING_BAR_ID: &str = "loading-bar";
pub const LOADING_LABEL_ID: &str = "loading-label";

// Reel content
pub const TECH_NAMES: [&str; 5] = ["Next.js", "React", "Three.js", "GSAP", "Tailwind"];

// Reel layout and focus falloff
pub const ITEM_SPACING: f32 = 1.6; // world units between reel items
pub const REEL_DEPTH_Z: f32 = -2.0; // reel group sits behind the spheres
pub const FADE_RANGE_FACTOR: f32 = 0.7; // fade range = spacing * factor
pub const OPACITY_EXPONENT: i32 = 2; // quadratic falloff around the focus line
pub const FOCUS_SCALE_BONUS: f32 = 0.2; // focused items grow up to 20%

// Scroll trigger
pub const SCROLL_DISTANCE: f64 = 2000.0; // px of scroll consumed as progress
pub const SCROLL_PIN: bool = true;

// Hover squish
pub const HOVER_SCALE_XY: f32 = 1.15; // +15% on X/Y while hovered
pub const HOVER_SCALE_Z: f32 = 0.8; // -20% on Z while hovered
pub const SQUISH_SMOOTHING: f32 = 0.3; // per-frame lerp factor toward target

// Float wobble around each sphere
pub const FLOAT_SPEED: f32 = 4.0;
pub const FLOAT_ROTATION_INTENSITY: f32 = 2.0;
pub const FLOAT_INTENSITY: f32 = 2.0;
pub const FLOAT_PHASE_SPAN: f32 = 10_000.0; // per-sphere phase drawn from 0..span seconds

// Camera
pub const CAMERA_Z: f32 = 8.0;
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const WIDE_VIEWPORT_WIDTH: f32 = 10.0; // above this the reel uses the fixed font size
pub const WIDE_FONT_SIZE: f32 = 1.5;
pub const NARROW_FONT_DIVISOR: f32 = 8.0;
pub const SPHERE_SCALE_DIVISOR: f32 = 9.0;
pub const SPHERE_OFFSET_DIVISOR: f32 = 3.0;

// Matrix rain
pub const RAIN_TICK_MS: i32 = 33; // ~30 Hz
pub const RAIN_GLYPH_SIZE: f32 = 16.0; // px per glyph cell
pub const RAIN_TRAIL_ALPHA: f32 = 0.05; // dark overlay alpha per tick
pub const RAIN_RESET_PROBABILITY: f64 = 0.025; // per tick once past the bottom
pub const RAIN_START_ROWS_ABOVE: f32 = 100.0; // max rows above the top at (re)start
pub const RAIN_VISIBILITY_THRESHOLD: f64 = 0.1; // on-screen ratio that starts the loop

// Colors
pub const SCENE_BACKGROUND: &str = "#050505";
pub const RAIN_GLYPH_COLOR: &str = "#0F0";
pub const REEL_TEXT_COLOR: &str = "#ffffff";
