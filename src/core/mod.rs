pub mod fetcher;
pub mod grid;
pub mod palette;
pub mod render;
pub mod selection;
pub mod session;
pub mod state;
