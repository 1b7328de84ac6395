use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{consultations, patients};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // created_at is carried by the table but not mapped outward
pub struct PatientRow {
    pub id: i64,
    pub name: String,
    pub telephone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub struct NewPatientRow {
    pub name: String,
    pub telephone: String,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = patients)]
pub struct PatientChangeset {
    pub name: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = consultations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct ConsultationRow {
    pub id: i64,
    pub date: String,
    pub hour: String,
    pub patient_id: i64,
    pub specialty: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = consultations)]
pub struct NewConsultationRow {
    pub date: String,
    pub hour: String,
    pub patient_id: i64,
    pub specialty: String,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = consultations)]
pub struct ConsultationChangeset {
    pub date: Option<String>,
    pub hour: Option<String>,
    pub patient_id: Option<i64>,
    pub specialty: Option<String>,
}
