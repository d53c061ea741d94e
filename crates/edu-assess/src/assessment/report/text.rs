use std::fmt::Write;

use super::{ReportData, NEXT_STEPS, PLATFORM_NAME};

/// Render the fixed-section plain-text report.
///
/// Section order and field presence are stable: header, student info,
/// results block, enumerated recommendations, next steps, footer. Numeric
/// fields can be parsed back out of the text (see the round-trip tests).
pub fn render_text_report(data: &ReportData) -> String {
    let student = &data.student;
    let result = &data.result;
    let mut out = String::new();

    let title = format!(
        "SKILLS ASSESSMENT REPORT - {}",
        PLATFORM_NAME.to_uppercase()
    );
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    out.push('\n');

    let _ = writeln!(out, "Student: {}", student.name);
    let _ = writeln!(out, "Email: {}", student.email);
    let _ = writeln!(
        out,
        "Education Level: {}",
        student
            .education_level
            .map(|level| level.label())
            .unwrap_or("not specified")
    );
    let _ = writeln!(
        out,
        "Assessment Date: {}",
        result.completed_at.format("%Y-%m-%d")
    );
    out.push('\n');

    let _ = writeln!(out, "ASSESSMENT RESULTS");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out, "Questions Answered: {}", result.total_questions);
    let _ = writeln!(out, "Correct Answers: {}", result.score);
    let _ = writeln!(out, "Score: {:.0}%", result.percentage);
    let _ = writeln!(out, "Measured Level: {}", result.measured_level.label());
    out.push('\n');

    let _ = writeln!(out, "COURSE RECOMMENDATIONS");
    let _ = writeln!(out, "======================");
    for (index, recommendation) in result.recommendations.iter().enumerate() {
        let course = &recommendation.course;
        out.push('\n');
        let _ = writeln!(out, "{}. {}", index + 1, course.title);
        let _ = writeln!(out, "   Level: {}", course.level.label());
        let _ = writeln!(out, "   Duration: {}", course.duration);
        let _ = writeln!(out, "   Reason: {}", recommendation.reason);
        let _ = writeln!(out, "   Description: {}", course.description);
        let _ = writeln!(out, "   Topics: {}", course.topics.join(", "));
        let _ = writeln!(out, "   Prerequisites: {}", course.prerequisites.join(", "));
    }
    out.push('\n');

    let _ = writeln!(out, "NEXT STEPS");
    let _ = writeln!(out, "==========");
    for (index, step) in NEXT_STEPS.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, step);
    }
    out.push('\n');

    let _ = writeln!(out, "Thank you for using our online course platform!");
    let _ = writeln!(out, "For more information, visit our website.");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{AssessmentAnswer, AssessmentResult, MeasuredLevel, ResultId};
    use crate::assessment::recommendation::recommend;
    use crate::catalog::Catalog;
    use crate::students::domain::{EducationLevel, Student, StudentId};
    use chrono::{TimeZone, Utc};

    fn sample_data() -> ReportData {
        let catalog = Catalog::standard();
        let recommendations =
            recommend(&catalog, MeasuredLevel::Advanced, None).expect("valid table");

        ReportData {
            student: Student {
                id: StudentId(7),
                name: "Ana Torres".to_string(),
                email: "ana.torres@example.com".to_string(),
                phone: None,
                age: Some(24),
                education_level: Some(EducationLevel::Undergraduate),
                declared_level: None,
                registered_at: Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap(),
            },
            result: AssessmentResult {
                id: ResultId(1),
                student_id: StudentId(7),
                answers: vec![AssessmentAnswer {
                    question_id: "1".to_string(),
                    selected_option: 0,
                    correct: true,
                }],
                score: 8,
                total_questions: 10,
                percentage: 80.0,
                measured_level: MeasuredLevel::Advanced,
                declared_level: None,
                recommendations,
                completed_at: Utc.with_ymd_and_hms(2026, 2, 1, 15, 30, 0).unwrap(),
            },
        }
    }

    fn extract(report: &str, label: &str) -> String {
        report
            .lines()
            .find_map(|line| line.strip_prefix(label))
            .unwrap_or_else(|| panic!("label '{label}' missing from report"))
            .trim()
            .to_string()
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let report = render_text_report(&sample_data());
        let header = report.find("SKILLS ASSESSMENT REPORT").expect("header");
        let results = report.find("ASSESSMENT RESULTS").expect("results block");
        let courses = report
            .find("COURSE RECOMMENDATIONS")
            .expect("recommendations block");
        let steps = report.find("NEXT STEPS").expect("next steps block");
        assert!(header < results && results < courses && courses < steps);
    }

    #[test]
    fn numeric_fields_round_trip_through_the_text() {
        let data = sample_data();
        let report = render_text_report(&data);

        let total: u32 = extract(&report, "Questions Answered:").parse().unwrap();
        let score: u32 = extract(&report, "Correct Answers:").parse().unwrap();
        let percentage: f32 = extract(&report, "Score:")
            .trim_end_matches('%')
            .parse()
            .unwrap();
        let level = extract(&report, "Measured Level:");

        assert_eq!(total, data.result.total_questions);
        assert_eq!(score, data.result.score);
        assert_eq!(percentage, data.result.percentage);
        assert_eq!(level, data.result.measured_level.label());
    }

    #[test]
    fn recommendations_are_enumerated_with_course_metadata() {
        let data = sample_data();
        let report = render_text_report(&data);
        for (index, recommendation) in data.result.recommendations.iter().enumerate() {
            let heading = format!("{}. {}", index + 1, recommendation.course.title);
            assert!(report.contains(&heading), "missing '{heading}'");
            assert!(report.contains(&recommendation.reason));
        }
        assert!(report.contains("1. Review the course recommendations"));
    }

    #[test]
    fn missing_education_level_renders_a_placeholder() {
        let mut data = sample_data();
        data.student.education_level = None;
        let report = render_text_report(&data);
        assert!(report.contains("Education Level: not specified"));
    }
}
