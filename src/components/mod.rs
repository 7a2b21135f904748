// Export components
pub mod eventbrite;

// Re-export the API seam and its HTTP implementation
pub use eventbrite::{EventbriteApi, EventbriteClient};
