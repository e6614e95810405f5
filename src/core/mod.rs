pub mod autoplay;
pub mod choice;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod format;
pub mod history;
pub mod input;
pub mod keymap;
pub mod pronoun;
pub mod view;
