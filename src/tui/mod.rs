pub mod draw;
pub mod run;
pub mod state;
pub mod views;

pub use run::run;
pub use state::TuiState;
