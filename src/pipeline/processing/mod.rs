// Stages applied to a map export: read elements, shape each one
pub mod normalize;
pub mod parser;
pub mod shape;
