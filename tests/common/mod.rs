#![allow(dead_code)]

pub mod app;
pub mod factory;
pub mod xlsx;

pub use app::*;
pub use factory::*;
