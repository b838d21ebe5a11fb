use super::{action::ActionKind, persona::Persona};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One attendance event. Date and time are distinct fields stored as TEXT
/// ("YYYY-MM-DD" / "HH:MM:SS") and compared independently; a registro is
/// immutable once created by the check-in flow (an update query exists only
/// for manual data correction).
#[derive(Debug, Clone, Serialize)]
pub struct Registro {
    pub id: i64,            // ⇔ registros.id
    pub persona_id: i64,    // ⇔ registros.persona_id
    pub kind: ActionKind,   // ⇔ registros.kind ('Entrada' | 'Salida')
    pub date: NaiveDate,    // ⇔ registros.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,    // ⇔ registros.time (TEXT "HH:MM:SS")
    #[serde(skip)]
    pub persona: Persona,   // joined owner row
}

impl Registro {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }

    /// Short time used in reports and listings.
    pub fn time_short(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}
