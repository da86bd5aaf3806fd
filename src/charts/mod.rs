//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartPlotter, BLUE, GREEN, ORANGE, PALETTE, PINK, PURPLE, RED};
