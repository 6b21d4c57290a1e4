pub mod messages;
pub mod week_grid;
