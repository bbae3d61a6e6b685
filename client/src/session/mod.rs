pub mod manager;
pub mod state;
pub mod transcript;

pub use manager::*;
pub use state::*;
pub use transcript::*;
