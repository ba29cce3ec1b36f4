//! Post listing and creation

pub mod ports;
