
// Re-export commonly used mocks
pub use renderer::MockRenderer;
