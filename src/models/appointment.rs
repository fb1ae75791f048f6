use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentSlot {
    pub date: String,
    pub time: String,
    pub status: String,
}

impl AppointmentSlot {
    pub fn available(date: &str, time: &str) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            status: "available".to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.eq_ignore_ascii_case("available")
    }
}

/// Shape of both the schedule file and a lookup result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Appointments {
    #[serde(default)]
    pub appointments: Vec<AppointmentSlot>,
}
