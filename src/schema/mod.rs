pub mod node;
pub mod roster;
pub mod state;
pub mod story;
