//! A Clappy Bird clone for the terminal: half-block pixel rendering on a
//! fixed 400x600 canvas, a 60 fps fixed-step loop, synthesized sound, and
//! two board orientations (classic vertical pipes and sideways bars).

pub mod app;
pub mod audio;
pub mod config;
pub mod geom;
pub mod input;
pub mod render;
pub mod screens;
pub mod sim;
pub mod sprite;
