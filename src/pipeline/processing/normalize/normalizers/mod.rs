// Value normalizers applied to individual nested tag values
pub mod network;
pub mod postcode;

pub use network::{normalize_network, normalize_network_with, EmptySegments};
pub use postcode::{normalize_postcode, PostcodeNormalizer};
