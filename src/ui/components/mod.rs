pub mod explorer_screen;
pub mod modal;
pub mod progress_bar;
pub mod quiz_screen;
