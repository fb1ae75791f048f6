use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::models::{AppointmentSlot, Appointments};
use crate::services::json_file;

/// Flat JSON store of appointment slots.
pub struct ScheduleStore {
    path: PathBuf,
}

impl ScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Slots whose date string equals `date` exactly. An absent store is
    /// seeded with two available slots for `date`, which are returned.
    pub fn get_appointments(&self, date: &str) -> anyhow::Result<Appointments> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), date, "schedule file not found, creating default data");
            return self.seed(date);
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read schedule at {}", self.path.display()))?;
        let schedule: Appointments = serde_json::from_str(&raw)
            .with_context(|| format!("invalid schedule JSON in {}", self.path.display()))?;

        let appointments = schedule
            .appointments
            .into_iter()
            .filter(|slot| slot.date == date)
            .collect::<Vec<_>>();
        tracing::debug!(date, count = appointments.len(), "found appointments");

        Ok(Appointments { appointments })
    }

    fn seed(&self, date: &str) -> anyhow::Result<Appointments> {
        let defaults = Appointments {
            appointments: vec![
                AppointmentSlot::available(date, "09:00"),
                AppointmentSlot::available(date, "10:00"),
            ],
        };

        json_file::write_atomic(&self.path, &defaults)
            .with_context(|| format!("failed to create schedule at {}", self.path.display()))?;

        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_store_is_seeded_with_two_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduleStore::new(dir.path().join("data").join("schedule.json"));

        let result = store.get_appointments("2024-12-11").unwrap();
        assert_eq!(result.appointments.len(), 2);
        assert_eq!(result.appointments[0].time, "09:00");
        assert_eq!(result.appointments[1].time, "10:00");
        assert!(result.appointments.iter().all(|s| s.is_available() && s.date == "2024-12-11"));

        // Seeded file is persisted and read back on the next call
        assert!(store.path().exists());
        let again = store.get_appointments("2024-12-11").unwrap();
        assert_eq!(again, result);
    }

    #[test]
    fn test_filters_by_exact_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(
            &path,
            r#"{"appointments":[
                {"date":"2024-12-11","time":"09:00","status":"available"},
                {"date":"2024-12-12","time":"11:00","status":"booked"},
                {"date":"2024-12-11","time":"14:00","status":"booked"}
            ]}"#,
        )
        .unwrap();
        let store = ScheduleStore::new(path);

        let result = store.get_appointments("2024-12-11").unwrap();
        let times: Vec<&str> = result.appointments.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "14:00"]);
        assert!(!result.appointments[1].is_available());

        assert!(store.get_appointments("2024-12-13").unwrap().appointments.is_empty());
    }

    #[test]
    fn test_corrupt_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ScheduleStore::new(path).get_appointments("2024-12-11").is_err());
    }
}
