//! Plot views rendered in the central panel

pub mod magnitude;
pub mod phase;

pub use magnitude::MagnitudeView;
pub use phase::PhaseView;
