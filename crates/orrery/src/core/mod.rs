pub mod clock;
pub mod moving_average;
pub mod system;
pub mod time;
