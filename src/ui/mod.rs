pub mod messages;
pub mod notification;
pub mod sound;
