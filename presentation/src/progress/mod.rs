//! Progress reporting for dispatch runs

pub mod console;
