//! Pure game rules. Nothing in here locks, sleeps or sends.

pub mod assignment;
pub mod day;
pub mod night;
pub mod victory;
pub mod view;
