pub mod float_ext;
pub mod log_setup;
pub mod parallel;
pub mod test_utils;

pub const EPSILON: f64 = 1e-6;
