pub mod state;
pub mod ws;
