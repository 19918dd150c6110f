#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

pub mod log;
pub mod ongoing_training_session;
pub mod settings;
pub mod statistics;
pub mod ticker;
pub mod training_session;
pub mod workout_start;
