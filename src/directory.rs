//! Student/personnel directory
//!
//! Identity ownership is external; the service only needs enough of each
//! record to validate references, group admin stats by hostel, and keep a
//! running personnel rating. Seeded at startup.

use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use utoipa::ToSchema;

/// A student known to the service.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: u64,
    pub full_name: String,
    pub hostel: String,
    pub room_number: String,
    pub phone_number: String,
}

/// A laundry worker.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub id: u64,
    pub full_name: String,
    pub employee_id: String,
    pub phone_number: String,
    pub years_experience: u32,
    /// Average over rated DONE orders; seeded baseline until first rating
    #[schema(value_type = String)]
    pub rating: Decimal,
}

/// In-memory registry of students and personnel.
pub struct Directory {
    students: DashMap<u64, Student>,
    personnel: DashMap<u64, Personnel>,
    next_student_id: AtomicU64,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            students: DashMap::new(),
            personnel: DashMap::new(),
            next_student_id: AtomicU64::new(1),
        }
    }

    /// Directory with the stock personnel roster and resident students.
    pub fn with_seed_data() -> Self {
        let dir = Self::new();
        let roster = [
            ("Rahul Kumar", "EMP001", "9876543210", 5, dec!(4.0)),
            ("Sanjeev Sharma", "EMP002", "9876543211", 3, dec!(3.0)),
            ("Arjun Patel", "EMP003", "9876543212", 4, dec!(4.0)),
            ("Rajkumar Sinha", "EMP004", "9876543213", 2, dec!(3.0)),
            ("Tejkumar", "EMP005", "9876543214", 6, dec!(5.0)),
        ];
        for (i, (name, emp_id, phone, years, rating)) in roster.into_iter().enumerate() {
            let id = i as u64 + 1;
            dir.personnel.insert(
                id,
                Personnel {
                    id,
                    full_name: name.to_string(),
                    employee_id: emp_id.to_string(),
                    phone_number: phone.to_string(),
                    years_experience: years,
                    rating,
                },
            );
        }
        let residents = [
            ("Amit Singh", "Hostel A", "101", "9000000001"),
            ("Priya Nair", "Hostel B", "204", "9000000002"),
            ("Rohan Das", "Hostel C", "312", "9000000003"),
        ];
        for (name, hostel, room, phone) in residents {
            dir.add_student(name, hostel, room, phone);
        }
        dir
    }

    pub fn add_student(
        &self,
        full_name: impl Into<String>,
        hostel: impl Into<String>,
        room_number: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Student {
        let id = self.next_student_id.fetch_add(1, Ordering::SeqCst);
        let student = Student {
            id,
            full_name: full_name.into(),
            hostel: hostel.into(),
            room_number: room_number.into(),
            phone_number: phone_number.into(),
        };
        self.students.insert(id, student.clone());
        student
    }

    pub fn student(&self, id: u64) -> Option<Student> {
        self.students.get(&id).map(|s| s.clone())
    }

    pub fn personnel(&self, id: u64) -> Option<Personnel> {
        self.personnel.get(&id).map(|p| p.clone())
    }

    pub fn has_student(&self, id: u64) -> bool {
        self.students.contains_key(&id)
    }

    pub fn has_personnel(&self, id: u64) -> bool {
        self.personnel.contains_key(&id)
    }

    /// All personnel, best-rated first (the student picker view).
    pub fn personnel_by_rating(&self) -> Vec<Personnel> {
        let mut all: Vec<Personnel> = self.personnel.iter().map(|p| p.clone()).collect();
        all.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        all
    }

    /// Overwrite a personnel's running rating after a new student rating.
    pub fn set_personnel_rating(&self, id: u64, rating: Decimal) {
        if let Some(mut p) = self.personnel.get_mut(&id) {
            p.rating = rating;
        }
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::with_seed_data()
    }
}
