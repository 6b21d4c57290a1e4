pub mod cell;
pub mod day_row;
pub mod open_span;
pub mod pair_sums;
pub mod week;
