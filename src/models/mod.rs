pub mod command;
pub mod day_series;
pub mod mode;
pub mod plan;
pub mod raw_row;
pub mod record;
