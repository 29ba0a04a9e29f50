//! Default value functions for serde deserialization.

pub fn map_size() -> usize {
    512
}

pub fn binning_factor() -> usize {
    2
}

pub fn global_order() -> u8 {
    3
}

pub fn system_order() -> u8 {
    1
}

pub fn pose_dimensions() -> usize {
    3
}

pub fn clamp_min() -> f32 {
    1.0
}

pub fn clamp_max() -> f32 {
    512.0
}

pub fn save_dir() -> String {
    "./processed".to_string()
}

pub fn start_heading() -> f32 {
    1.5708
}

pub fn enabled() -> bool {
    true
}
