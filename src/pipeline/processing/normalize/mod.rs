//! Stateless value normalizers used while shaping nested tags.

pub mod normalizers;

pub use normalizers::{
    normalize_network, normalize_network_with, normalize_postcode, EmptySegments,
    PostcodeNormalizer,
};
