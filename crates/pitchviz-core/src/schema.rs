use polars::prelude::DataFrame;

pub const ATHLETE_NAME: &str = "athlete_name";
pub const HANDEDNESS: &str = "handedness";
pub const TRUNK_VELOCITY: &str = "trunk_rotational_velocity_with_respect_to_ground";
pub const PELVIS_VELOCITY: &str = "pelvis_rotational_velocity_with_respect_to_ground";
pub const LEFT_ARM_VELOCITY: &str = "left_arm_rotational_velocity_with_respect_to_ground";
pub const RIGHT_ARM_VELOCITY: &str = "right_arm_rotational_velocity_with_respect_to_ground";
pub const RIGHT_KNEE_EXTENSION_VELOCITY: &str = "right_knee_extension_velocity";
pub const LEFT_KNEE_EXTENSION_VELOCITY: &str = "left_knee_extension_velocity";
pub const FOOT_CONTACT_TIME: &str = "foot_contact_time";
pub const BALL_RELEASE_TIME: &str = "ball_release_time";
pub const TIME: &str = "time";

pub const REQUIRED_COLUMNS: [&str; 11] = [
    ATHLETE_NAME,
    HANDEDNESS,
    TRUNK_VELOCITY,
    PELVIS_VELOCITY,
    LEFT_ARM_VELOCITY,
    RIGHT_ARM_VELOCITY,
    RIGHT_KNEE_EXTENSION_VELOCITY,
    LEFT_KNEE_EXTENSION_VELOCITY,
    FOOT_CONTACT_TIME,
    BALL_RELEASE_TIME,
    TIME,
];

/// Columns read as labels; their cells are kept verbatim even when they look numeric.
pub const TEXT_COLUMNS: [&str; 2] = [ATHLETE_NAME, HANDEDNESS];

/// Names of the normalized frame produced by the transform.
pub mod normalized {
    pub const HANDEDNESS: &str = "handedness";
    pub const ARM_VELOCITY: &str = "arm_velocity";
    pub const TIME: &str = "time";
    pub const TRUNK_VELOCITY: &str = "trunk_velocity";
    pub const PELVIS_VELOCITY: &str = "pelvis_velocity";
    pub const LEAD_LEG_EXTENSION_VELOCITY: &str = "lead_leg_extension_velocity";
    pub const FOOT_CONTACT_TIME: &str = "foot_contact_time";
    pub const BALL_RELEASE_TIME: &str = "ball_release_time";

    pub const VELOCITY_COLUMNS: [&str; 4] = [
        PELVIS_VELOCITY,
        TRUNK_VELOCITY,
        ARM_VELOCITY,
        LEAD_LEG_EXTENSION_VELOCITY,
    ];
}

/// Required columns absent from `df`, in required-list order.
pub fn missing_columns(df: &DataFrame) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|name| df.get_column_index(name).is_none())
        .map(|name| name.to_string())
        .collect()
}
