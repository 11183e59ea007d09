pub mod controller;
pub mod dialogs;
pub mod format;
pub mod listing;
pub mod metadata;
pub mod preview;
