//! Comments on posts

pub mod ports;
