pub mod ports;
pub mod shape_use_case;
