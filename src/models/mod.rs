pub mod category;
pub mod product;

// Re-exports for convenience
pub use category::*;
pub use product::*;
