use crate::infra::{parse_declared, InMemoryResultRepository, InMemoryStudentRepository};
use chrono::Utc;
use clap::Args;
use edu_assess::assessment::domain::{AssessmentResult, MeasuredLevel, ResultId};
use edu_assess::assessment::report::ReportBlock;
use edu_assess::assessment::service::{AssessmentService, SubmittedAnswer};
use edu_assess::assessment::{
    recommend, render_document, render_text_report, score_answers, AnswerSheetImporter,
    AssessmentAnswer, AssessmentServiceError, ReportData,
};
use edu_assess::catalog::Catalog;
use edu_assess::error::AppError;
use edu_assess::students::domain::{DeclaredLevel, NewStudent, Student, StudentId};
use edu_assess::students::service::StudentService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// CSV answer sheet with question_id and selected_option columns.
    /// Defaults to a built-in sample sheet (7 of 10 correct).
    #[arg(long)]
    pub(crate) answers_csv: Option<PathBuf>,
    /// Student name printed on the report
    #[arg(long, default_value = "Sample Student")]
    pub(crate) name: String,
    /// Student email printed on the report
    #[arg(long, default_value = "student@example.com")]
    pub(crate) email: String,
    /// Self-declared experience level (none, basic, intermediate, advanced)
    #[arg(long, value_parser = parse_declared)]
    pub(crate) declared: Option<DeclaredLevel>,
    /// Render the paginated document layout instead of the plain text report
    #[arg(long)]
    pub(crate) paginated: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// How many of the ten questions the demo student answers correctly
    #[arg(long, default_value_t = 8)]
    pub(crate) correct: usize,
    /// Self-declared experience level (none, basic, intermediate, advanced)
    #[arg(long, value_parser = parse_declared)]
    pub(crate) declared: Option<DeclaredLevel>,
}

pub(crate) fn run_assessment_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        answers_csv,
        name,
        email,
        declared,
        paginated,
    } = args;

    let catalog = Catalog::standard();
    let (answers, imported) = match answers_csv {
        Some(path) => (AnswerSheetImporter::from_path(path, &catalog)?, true),
        None => (sample_answers(&catalog), false),
    };

    let summary = score_answers(&answers).map_err(AssessmentServiceError::from)?;
    let measured = MeasuredLevel::from_percentage(summary.percentage);
    let recommendations =
        recommend(&catalog, measured, declared).map_err(AssessmentServiceError::from)?;

    if imported {
        println!("Data source: CSV answer sheet import");
    } else {
        println!("Data source: built-in sample answers");
    }
    println!(
        "Graded {}/{} correct ({}%) -> {}\n",
        summary.correct,
        summary.total,
        summary.percentage,
        measured.label()
    );

    let now = Utc::now();
    let data = ReportData {
        student: Student {
            id: StudentId(0),
            name,
            email,
            phone: None,
            age: None,
            education_level: None,
            declared_level: declared,
            registered_at: now,
        },
        result: AssessmentResult {
            id: ResultId(0),
            student_id: StudentId(0),
            answers,
            score: summary.correct,
            total_questions: summary.total,
            percentage: summary.percentage,
            measured_level: measured,
            declared_level: declared,
            recommendations,
            completed_at: now,
        },
    };

    if paginated {
        render_paginated(&data);
    } else {
        println!("{}", render_text_report(&data));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { correct, declared } = args;

    println!("Skills assessment demo");

    let catalog = Arc::new(Catalog::standard());
    let students = Arc::new(InMemoryStudentRepository::default());
    let results = Arc::new(InMemoryResultRepository::default());
    let student_service = StudentService::new(students.clone(), results.clone());
    let assessment_service = AssessmentService::new(students, results, catalog);

    let student = student_service.register(NewStudent {
        name: "Demo Student".to_string(),
        email: "demo.student@example.com".to_string(),
        phone: None,
        age: Some(24),
        education_level: None,
        declared_level: declared,
    })?;
    println!(
        "- Registered {} <{}> as student {}",
        student.name, student.email, student.id
    );

    let question_count = assessment_service.catalog().questions().len();
    let correct = correct.min(question_count);
    let answers: Vec<SubmittedAnswer> = assessment_service
        .catalog()
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = if index < correct {
                question.correct_option
            } else {
                (question.correct_option + 1) % question.options.len()
            };
            SubmittedAnswer {
                question_id: question.id.clone(),
                selected_option: selected,
                is_correct: None,
            }
        })
        .collect();

    let result = assessment_service.submit(student.id, answers)?;
    println!(
        "- Scored {}/{} ({}%) -> measured level {}",
        result.score,
        result.total_questions,
        result.percentage,
        result.measured_level.label()
    );
    println!("- Recommended courses:");
    for recommendation in &result.recommendations {
        println!(
            "    {}. {} ({}) - {}",
            recommendation.priority,
            recommendation.course.title,
            recommendation.course.level.label(),
            recommendation.reason
        );
    }

    let data = assessment_service.report_data(result.id)?;
    println!("\n{}", render_text_report(&data));

    let stats = assessment_service.stats()?;
    println!(
        "Platform stats: {} result(s), average score {}%",
        stats.total_results, stats.average_percentage
    );

    Ok(())
}

fn sample_answers(catalog: &Catalog) -> Vec<AssessmentAnswer> {
    catalog
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = if index < 7 {
                question.correct_option
            } else {
                (question.correct_option + 1) % question.options.len()
            };
            AssessmentAnswer {
                question_id: question.id.clone(),
                selected_option: selected,
                correct: selected == question.correct_option,
            }
        })
        .collect()
}

fn render_paginated(data: &ReportData) {
    let document = render_document(data);
    for page in &document.pages {
        println!("=== Page {} ===", page.number);
        for block in &page.blocks {
            match block {
                ReportBlock::Header { platform, title } => {
                    println!("[header] {title} - {platform}");
                }
                ReportBlock::StudentInfo {
                    name,
                    email,
                    assessment_date,
                    ..
                } => {
                    println!("[student] {name} <{email}> assessed {assessment_date}");
                }
                ReportBlock::ScoreSummary {
                    percentage,
                    band_label,
                    correct,
                    total,
                    level,
                    ..
                } => {
                    println!(
                        "[score] {correct}/{total} ({percentage}%) - {band_label} - level {level}"
                    );
                }
                ReportBlock::Recommendation {
                    priority,
                    title,
                    duration,
                    reason,
                    ..
                } => {
                    println!("[course {priority}] {title} ({duration}) - {reason}");
                }
                ReportBlock::NextSteps { steps } => {
                    println!("[next steps]");
                    for step in steps {
                        println!("  - {step}");
                    }
                }
                ReportBlock::Footer { message } => {
                    println!("[footer] {message}");
                }
            }
        }
    }
}
