// Export components
pub mod export;
pub mod generation;
pub mod roster;
pub mod schedule;
pub mod storage;

// Re-export the generation handle
pub use generation::GenerationHandle;
