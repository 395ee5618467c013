pub mod device_map;
pub mod identity;
pub mod models;
