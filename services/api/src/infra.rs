use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use edu_assess::assessment::domain::{AssessmentResult, ResultId};
use edu_assess::assessment::repository::{
    NewAssessmentResult, RepositoryError, ResultRepository,
};
use edu_assess::students::domain::{DeclaredLevel, NewStudent, Student, StudentId, StudentUpdate};
use edu_assess::students::repository::StudentRepository;
use metrics_exporter_prometheus::PrometheusHandle;

pub(crate) fn parse_declared(raw: &str) -> Result<DeclaredLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" | "no-experience" | "no_experience" => Ok(DeclaredLevel::NoExperience),
        "basic" => Ok(DeclaredLevel::Basic),
        "intermediate" => Ok(DeclaredLevel::Intermediate),
        "advanced" => Ok(DeclaredLevel::Advanced),
        other => Err(format!(
            "unknown experience level '{other}' (expected none, basic, intermediate, or advanced)"
        )),
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Map-backed student store. Identifier assignment and the unique-email
/// constraint live here, standing in for the relational schema.
#[derive(Default)]
pub(crate) struct InMemoryStudentRepository {
    records: Mutex<BTreeMap<i64, Student>>,
    sequence: AtomicI64,
}

impl StudentRepository for InMemoryStudentRepository {
    fn insert(&self, new: NewStudent) -> Result<Student, RepositoryError> {
        let mut guard = self.records.lock().expect("student mutex poisoned");
        if guard
            .values()
            .any(|student| student.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(RepositoryError::Conflict);
        }

        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let student = Student {
            id: StudentId(id),
            name: new.name,
            email: new.email,
            phone: new.phone,
            age: new.age,
            education_level: new.education_level,
            declared_level: new.declared_level,
            registered_at: Utc::now(),
        };
        guard.insert(id, student.clone());
        Ok(student)
    }

    fn fetch(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Student>, RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard
            .values()
            .find(|student| student.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn page(&self, offset: usize, limit: usize) -> Result<(Vec<Student>, usize), RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        let total = guard.len();
        // Ids are monotonic, so reverse iteration is newest-first.
        let students = guard
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((students, total))
    }

    fn update(&self, id: StudentId, update: StudentUpdate) -> Result<Student, RepositoryError> {
        let mut guard = self.records.lock().expect("student mutex poisoned");
        if let Some(email) = &update.email {
            if guard
                .values()
                .any(|student| student.id != id && student.email.eq_ignore_ascii_case(email))
            {
                return Err(RepositoryError::Conflict);
            }
        }
        let student = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;

        if let Some(name) = update.name {
            student.name = name;
        }
        if let Some(email) = update.email {
            student.email = email;
        }
        if let Some(phone) = update.phone {
            student.phone = Some(phone);
        }
        if let Some(age) = update.age {
            student.age = Some(age);
        }
        if let Some(education_level) = update.education_level {
            student.education_level = Some(education_level);
        }
        if let Some(declared_level) = update.declared_level {
            student.declared_level = Some(declared_level);
        }

        Ok(student.clone())
    }

    fn delete(&self, id: StudentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("student mutex poisoned");
        guard
            .remove(&id.0)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Map-backed result store. Records are append-only apart from the cascade
/// delete that follows a student removal.
#[derive(Default)]
pub(crate) struct InMemoryResultRepository {
    records: Mutex<BTreeMap<i64, AssessmentResult>>,
    sequence: AtomicI64,
}

impl ResultRepository for InMemoryResultRepository {
    fn insert(&self, new: NewAssessmentResult) -> Result<AssessmentResult, RepositoryError> {
        let mut guard = self.records.lock().expect("result mutex poisoned");
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = AssessmentResult {
            id: ResultId(id),
            student_id: new.student_id,
            answers: new.answers,
            score: new.score,
            total_questions: new.total_questions,
            percentage: new.percentage,
            measured_level: new.measured_level,
            declared_level: new.declared_level,
            recommendations: new.recommendations,
            completed_at: new.completed_at,
        };
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: ResultId) -> Result<Option<AssessmentResult>, RepositoryError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<AssessmentResult>, RepositoryError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        let mut results: Vec<AssessmentResult> = guard
            .values()
            .filter(|record| record.student_id == student_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| (b.completed_at, b.id).cmp(&(a.completed_at, a.id)));
        Ok(results)
    }

    fn delete_for_student(&self, student_id: StudentId) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("result mutex poisoned");
        let doomed: Vec<i64> = guard
            .values()
            .filter(|record| record.student_id == student_id)
            .map(|record| record.id.0)
            .collect();
        for id in &doomed {
            guard.remove(id);
        }
        Ok(doomed.len())
    }

    fn all(&self) -> Result<Vec<AssessmentResult>, RepositoryError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str) -> NewStudent {
        NewStudent {
            name: "Test Student".to_string(),
            email: email.to_string(),
            phone: None,
            age: None,
            education_level: None,
            declared_level: Some(DeclaredLevel::Basic),
        }
    }

    #[test]
    fn student_ids_increment_and_emails_are_unique() {
        let repo = InMemoryStudentRepository::default();
        let first = repo.insert(registration("a@example.com")).expect("inserts");
        let second = repo.insert(registration("b@example.com")).expect("inserts");
        assert_eq!(first.id, StudentId(1));
        assert_eq!(second.id, StudentId(2));

        let duplicate = repo.insert(registration("A@EXAMPLE.COM"));
        assert!(matches!(duplicate, Err(RepositoryError::Conflict)));
    }

    #[test]
    fn paging_is_newest_first_with_total() {
        let repo = InMemoryStudentRepository::default();
        for index in 0..5 {
            repo.insert(registration(&format!("s{index}@example.com")))
                .expect("inserts");
        }

        let (page, total) = repo.page(0, 2).expect("pages");
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, StudentId(5));

        let (tail, _) = repo.page(4, 2).expect("pages");
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].id, StudentId(1));
    }

    #[test]
    fn update_touches_only_provided_fields() {
        let repo = InMemoryStudentRepository::default();
        let student = repo.insert(registration("a@example.com")).expect("inserts");

        let updated = repo
            .update(
                student.id,
                StudentUpdate {
                    name: Some("Renamed".to_string()),
                    ..StudentUpdate::default()
                },
            )
            .expect("updates");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.declared_level, Some(DeclaredLevel::Basic));
    }

    #[test]
    fn update_rejects_an_email_owned_by_another_student() {
        let repo = InMemoryStudentRepository::default();
        repo.insert(registration("a@example.com")).expect("inserts");
        let second = repo.insert(registration("b@example.com")).expect("inserts");

        let stolen = repo.update(
            second.id,
            StudentUpdate {
                email: Some("A@EXAMPLE.COM".to_string()),
                ..StudentUpdate::default()
            },
        );
        assert!(matches!(stolen, Err(RepositoryError::Conflict)));

        // Re-submitting your own address in a different casing is fine.
        let own = repo
            .update(
                second.id,
                StudentUpdate {
                    email: Some("B@example.com".to_string()),
                    ..StudentUpdate::default()
                },
            )
            .expect("updates");
        assert_eq!(own.email, "B@example.com");
    }
}
