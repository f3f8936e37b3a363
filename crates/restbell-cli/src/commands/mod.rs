pub mod config;
pub mod run;
pub mod slot;
pub mod sounds;
