pub mod device;
pub mod sample;

pub use device::{BusyFormat, BusySource, DeviceModel, DeviceProfile, MetricSource};
pub use sample::SampleResult;
