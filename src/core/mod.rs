pub mod alarm;
pub mod backup;
pub mod calendar;
pub mod config;
pub mod event;
pub mod log;
pub mod matcher;
pub mod reminder;
pub mod settings;
pub mod trigger;
