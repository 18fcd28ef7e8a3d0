pub mod device;
pub mod frame_rate;
pub mod performance;
pub mod sensors;
