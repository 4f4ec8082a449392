// Export all route modules
pub mod donations;
pub mod members;

// Re-export all route handlers for easy importing
pub use donations::*;
pub use members::*;
