pub mod classify;
pub mod collect;

// Re-export command functions for convenience
pub use classify::classify;
pub use collect::collect;
