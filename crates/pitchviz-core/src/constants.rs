// crates/pitchviz-core/src/constants.rs

use plotters::style::colors::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
use plotters::style::RGBColor;

// Default canvas, the 10x6 inch figure at 100 dpi.
pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;

pub const CHART_TITLE_PREFIX: &str = "Rotational Velocities";
pub const X_AXIS_LABEL: &str = "Capture Time";
pub const Y_AXIS_LABEL: &str = "Rotational Velocity";

pub const LABEL_PELVIS: &str = "Pelvis Rotational Velocity";
pub const LABEL_TRUNK: &str = "Trunk Rotational Velocity";
pub const LABEL_ARM: &str = "Pitching Arm Rotational Velocity";
pub const LABEL_LEAD_LEG: &str = "Lead Leg Extension Velocity";
pub const LABEL_FOOT_CONTACT: &str = "Foot Contact Time";
pub const LABEL_BALL_RELEASE: &str = "Ball Release Time";

// --- Color assignments ---
pub const COLOR_PELVIS: RGBColor = BLUE;
pub const COLOR_TRUNK: RGBColor = RED;
pub const COLOR_ARM: RGBColor = GREEN;
pub const COLOR_LEAD_LEG: RGBColor = WHITE;
pub const COLOR_FOOT_CONTACT: RGBColor = WHITE;
pub const COLOR_BALL_RELEASE: RGBColor = YELLOW;

// Night-mode theme.
pub const COLOR_BACKGROUND: RGBColor = BLACK;
pub const COLOR_FOREGROUND: RGBColor = WHITE;
pub const COLOR_GRID: RGBColor = RGBColor(128, 128, 128);

pub const FONT_FAMILY: &str = "sans-serif";
pub const FONT_SIZE_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 13;

pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_MARKER: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Dash and gap lengths in pixels.
pub const MARKER_DASH: u32 = 2;
pub const MARKER_GAP: u32 = 4;
pub const GRID_DASH: u32 = 6;
pub const GRID_GAP: u32 = 4;

pub const GRID_LINES: usize = 10;
pub const GRID_OPACITY: f64 = 0.5;
pub const GRID_LINE_WIDTH: u32 = 1;

pub const RANGE_PADDING_RATIO: f64 = 0.05;
pub const DEGENERATE_RANGE_PADDING: f64 = 0.5;
