//! Static level-to-course mapping with a secondary declared-level filter.
//!
//! One table keyed by measured level drives every caller. The declared level
//! is a filter only; it never changes which branch of the table is used.

use crate::catalog::{Catalog, CatalogError, CourseLevel};
use crate::students::domain::DeclaredLevel;

use super::domain::{CourseRecommendation, MeasuredLevel};

/// Recommendation lists are capped at this size.
pub const MAX_RECOMMENDATIONS: usize = 4;

struct TableEntry {
    course_id: &'static str,
    reason: &'static str,
}

const BEGINNER_TRACK: &[TableEntry] = &[
    TableEntry {
        course_id: "8",
        reason: "Starting with web development fundamentals will help you build a solid base.",
    },
    TableEntry {
        course_id: "1",
        reason: "After the basics, focus on HTML and CSS to build web pages.",
    },
    TableEntry {
        course_id: "2",
        reason: "JavaScript is essential for modern web programming.",
    },
];

const INTERMEDIATE_TRACK: &[TableEntry] = &[
    TableEntry {
        course_id: "2",
        reason: "Strengthen your JavaScript knowledge with modern concepts.",
    },
    TableEntry {
        course_id: "7",
        reason: "Improve your CSS skills to build more attractive interfaces.",
    },
    TableEntry {
        course_id: "3",
        reason: "React will let you build interactive web applications.",
    },
];

const ADVANCED_TRACK: &[TableEntry] = &[
    TableEntry {
        course_id: "4",
        reason: "Expand your skills toward the backend with Node.js.",
    },
    TableEntry {
        course_id: "10",
        reason: "TypeScript will improve the quality and maintainability of your code.",
    },
    TableEntry {
        course_id: "6",
        reason: "Become a complete full stack developer.",
    },
];

fn track_for(level: MeasuredLevel) -> &'static [TableEntry] {
    match level {
        MeasuredLevel::Beginner => BEGINNER_TRACK,
        MeasuredLevel::Intermediate => INTERMEDIATE_TRACK,
        MeasuredLevel::Advanced => ADVANCED_TRACK,
    }
}

/// The declared level only softens the list for self-reported novices: the
/// top-priority entry always survives, everything else must be within reach.
fn keep_for_declared(
    declared: DeclaredLevel,
    course_level: CourseLevel,
    rank: usize,
) -> bool {
    if rank == 0 {
        return true;
    }
    match declared {
        DeclaredLevel::NoExperience | DeclaredLevel::Basic => match course_level {
            CourseLevel::Beginner => true,
            CourseLevel::Intermediate => rank < 2,
            CourseLevel::Advanced => false,
        },
        DeclaredLevel::Intermediate => course_level != CourseLevel::Beginner,
        DeclaredLevel::Advanced => true,
    }
}

/// Build the ordered recommendation list for a measured level.
///
/// A table entry referencing a course id missing from the catalog is a
/// static-data integrity defect and fails fast with
/// [`CatalogError::UnknownCourse`].
pub fn recommend(
    catalog: &Catalog,
    measured: MeasuredLevel,
    declared: Option<DeclaredLevel>,
) -> Result<Vec<CourseRecommendation>, CatalogError> {
    let mut recommendations = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for (rank, entry) in track_for(measured).iter().enumerate() {
        if seen.contains(&entry.course_id) {
            continue;
        }
        let course = catalog.course(entry.course_id)?;

        if let Some(declared) = declared {
            if !keep_for_declared(declared, course.level, rank) {
                continue;
            }
        }

        seen.push(entry.course_id);
        recommendations.push(CourseRecommendation {
            course: course.clone(),
            reason: entry.reason.to_string(),
            priority: 0,
        });
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    for (index, recommendation) in recommendations.iter_mut().enumerate() {
        recommendation.priority = (index + 1) as u8;
    }

    Ok(recommendations)
}

/// Confirm every table entry resolves against the catalog. Run at startup so
/// a bad table fails the process instead of a request.
pub fn verify_tables(catalog: &Catalog) -> Result<(), CatalogError> {
    for level in [
        MeasuredLevel::Beginner,
        MeasuredLevel::Intermediate,
        MeasuredLevel::Advanced,
    ] {
        for entry in track_for(level) {
            catalog.course(entry.course_id)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::standard()
    }

    #[test]
    fn tables_resolve_against_the_standard_catalog() {
        verify_tables(&catalog()).expect("every table entry resolves");
    }

    #[test]
    fn beginner_track_starts_with_the_foundational_course() {
        let recommendations =
            recommend(&catalog(), MeasuredLevel::Beginner, None).expect("valid table");
        assert_eq!(recommendations[0].course.id, "8");
        assert_eq!(recommendations[0].priority, 1);
        assert_eq!(
            recommendations[0].course.prerequisites,
            vec!["None".to_string()]
        );
    }

    #[test]
    fn advanced_track_comes_from_the_advanced_branch() {
        let recommendations =
            recommend(&catalog(), MeasuredLevel::Advanced, None).expect("valid table");
        let ids: Vec<&str> = recommendations
            .iter()
            .map(|recommendation| recommendation.course.id.as_str())
            .collect();
        assert_eq!(ids, vec!["4", "10", "6"]);
    }

    #[test]
    fn lists_are_capped_deduplicated_and_sequentially_ranked() {
        for measured in [
            MeasuredLevel::Beginner,
            MeasuredLevel::Intermediate,
            MeasuredLevel::Advanced,
        ] {
            for declared in [
                None,
                Some(DeclaredLevel::NoExperience),
                Some(DeclaredLevel::Basic),
                Some(DeclaredLevel::Intermediate),
                Some(DeclaredLevel::Advanced),
            ] {
                let recommendations =
                    recommend(&catalog(), measured, declared).expect("valid table");
                assert!(recommendations.len() <= MAX_RECOMMENDATIONS);
                assert!(!recommendations.is_empty());

                let ids: HashSet<&str> = recommendations
                    .iter()
                    .map(|recommendation| recommendation.course.id.as_str())
                    .collect();
                assert_eq!(ids.len(), recommendations.len(), "duplicate course ids");

                for (index, recommendation) in recommendations.iter().enumerate() {
                    assert_eq!(recommendation.priority as usize, index + 1);
                    catalog()
                        .course(&recommendation.course.id)
                        .expect("recommended course exists in catalog");
                }
            }
        }
    }

    #[test]
    fn declared_beginner_never_sees_advanced_courses_past_the_top_slot() {
        let recommendations = recommend(
            &catalog(),
            MeasuredLevel::Advanced,
            Some(DeclaredLevel::NoExperience),
        )
        .expect("valid table");

        for recommendation in recommendations.iter().skip(1) {
            assert_ne!(recommendation.course.level, CourseLevel::Advanced);
        }
        // The top-priority entry survives regardless.
        assert_eq!(recommendations[0].course.id, "4");
    }

    #[test]
    fn declared_intermediate_drops_beginner_courses_past_the_top_slot() {
        let recommendations = recommend(
            &catalog(),
            MeasuredLevel::Beginner,
            Some(DeclaredLevel::Intermediate),
        )
        .expect("valid table");

        assert_eq!(recommendations[0].course.id, "8");
        for recommendation in recommendations.iter().skip(1) {
            assert_ne!(recommendation.course.level, CourseLevel::Beginner);
        }
    }

    #[test]
    fn missing_catalog_entry_is_a_data_integrity_failure() {
        // A catalog without course "6" breaks the advanced track.
        let standard = Catalog::standard();
        let courses = standard
            .courses()
            .iter()
            .filter(|course| course.id != "6")
            .cloned()
            .collect();
        let broken = Catalog::new(standard.questions().to_vec(), courses);

        let result = recommend(&broken, MeasuredLevel::Advanced, None);
        assert!(matches!(result, Err(CatalogError::UnknownCourse(id)) if id == "6"));
        assert!(verify_tables(&broken).is_err());
    }
}
