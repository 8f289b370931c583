#![allow(clippy::implicit_hasher)]

pub mod models;
pub mod components;
pub mod storage;
pub mod import;
pub mod constants;
pub mod dates;
pub mod geometry;
pub mod classify;
pub mod shading;
pub mod labels;
pub mod export;
pub mod state;
pub mod logging;

pub use components::app::App;
