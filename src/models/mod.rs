pub mod action;
pub mod device_status;
pub mod params;
pub mod result;
