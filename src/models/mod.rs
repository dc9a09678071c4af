pub mod event;
pub mod settings;

pub use event::Event;
pub use settings::Settings;
