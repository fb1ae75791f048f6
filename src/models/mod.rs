pub mod appointment;
pub mod email;
pub mod intent;
pub mod tool;

pub use appointment::{AppointmentSlot, Appointments};
pub use email::{Email, InboxRecord};
pub use intent::{ExtractedIntent, StructuredDataLog};
pub use tool::{ToolCall, ToolResults};
