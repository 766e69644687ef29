//! Physical terms of the advection forecast
//!
//! Each function is pure and takes the calibration factors explicitly:
//! - Conversion: satellite column to surface concentration
//! - Fire: distance-decayed contribution of active fires
//! - Washout: precipitation removal factor
//! - Bias: additive correction toward ground truth

pub mod bias;
pub mod conversion;
pub mod fire;
pub mod washout;

pub use bias::bias_correction;
pub use conversion::column_to_surface;
pub use fire::fire_impact;
pub use washout::washout;
