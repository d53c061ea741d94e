//! Paginated document layout for visual report clients.
//!
//! The original report was drawn onto fixed-height pages; the thresholds here
//! reproduce that page-break behavior structurally: a new page starts when the
//! remaining vertical budget is too small for the next recommendation or the
//! next-steps block. Score color bands survive as classification values.

use serde::Serialize;

use crate::catalog::CourseLevel;

use super::{ReportData, NEXT_STEPS, PLATFORM_NAME};

/// Usable vertical space per page, in layout units.
const PAGE_HEIGHT: f32 = 280.0;
const TOP_MARGIN: f32 = 20.0;
/// Minimum space required before starting a recommendation block.
const RECOMMENDATION_BREAK: f32 = 60.0;
/// Minimum space required before starting the next-steps block.
const NEXT_STEPS_BREAK: f32 = 80.0;

/// Performance band behind the original score colors: green >= 70, blue >= 40,
/// red otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Steady,
    NeedsWork,
}

impl ScoreBand {
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= 70.0 {
            ScoreBand::Strong
        } else if percentage >= 40.0 {
            ScoreBand::Steady
        } else {
            ScoreBand::NeedsWork
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "Excellent",
            ScoreBand::Steady => "Good",
            ScoreBand::NeedsWork => "Needs Improvement",
        }
    }
}

/// A typed content block positioned by the layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBlock {
    Header {
        platform: String,
        title: String,
    },
    StudentInfo {
        name: String,
        email: String,
        age: Option<u8>,
        education_level: Option<String>,
        assessment_date: String,
    },
    ScoreSummary {
        percentage: f32,
        band: ScoreBand,
        band_label: String,
        correct: u32,
        total: u32,
        level: String,
    },
    Recommendation {
        priority: u8,
        title: String,
        level: CourseLevel,
        duration: String,
        description: String,
        reason: String,
    },
    NextSteps {
        steps: Vec<String>,
    },
    Footer {
        message: String,
    },
}

impl ReportBlock {
    /// Estimated vertical extent, mirroring the drawn layout.
    fn height(&self) -> f32 {
        match self {
            ReportBlock::Header { .. } => 30.0,
            ReportBlock::StudentInfo { .. } => 55.0,
            ReportBlock::ScoreSummary { .. } => 70.0,
            ReportBlock::Recommendation { description, .. } => {
                35.0 + (description.chars().count() as f32 / 60.0).ceil() * 5.0
            }
            ReportBlock::NextSteps { steps } => 15.0 + steps.len() as f32 * 8.0,
            ReportBlock::Footer { .. } => 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPage {
    pub number: usize,
    pub blocks: Vec<ReportBlock>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub pages: Vec<ReportPage>,
}

struct Layout {
    pages: Vec<ReportPage>,
    current: Vec<ReportBlock>,
    cursor: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            cursor: TOP_MARGIN,
        }
    }

    fn remaining(&self) -> f32 {
        PAGE_HEIGHT - self.cursor
    }

    fn break_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(ReportPage {
            number,
            blocks: std::mem::take(&mut self.current),
        });
        self.cursor = TOP_MARGIN;
    }

    /// Start a new page when less than `threshold` space is left.
    fn ensure_space(&mut self, threshold: f32) {
        if !self.current.is_empty() && self.remaining() < threshold {
            self.break_page();
        }
    }

    fn push(&mut self, block: ReportBlock) {
        if !self.current.is_empty() && self.remaining() < block.height() {
            self.break_page();
        }
        self.cursor += block.height();
        self.current.push(block);
    }

    fn finish(mut self) -> ReportDocument {
        if !self.current.is_empty() {
            self.break_page();
        }
        ReportDocument { pages: self.pages }
    }
}

/// Lay the report content out onto pages.
pub fn render_document(data: &ReportData) -> ReportDocument {
    let student = &data.student;
    let result = &data.result;
    let band = ScoreBand::from_percentage(result.percentage);
    let mut layout = Layout::new();

    layout.push(ReportBlock::Header {
        platform: PLATFORM_NAME.to_string(),
        title: "Skills Assessment Report".to_string(),
    });

    layout.push(ReportBlock::StudentInfo {
        name: student.name.clone(),
        email: student.email.clone(),
        age: student.age,
        education_level: student
            .education_level
            .map(|level| level.label().to_string()),
        assessment_date: result.completed_at.format("%Y-%m-%d").to_string(),
    });

    layout.push(ReportBlock::ScoreSummary {
        percentage: result.percentage,
        band,
        band_label: band.label().to_string(),
        correct: result.score,
        total: result.total_questions,
        level: result.measured_level.label().to_string(),
    });

    for recommendation in &result.recommendations {
        layout.ensure_space(RECOMMENDATION_BREAK);
        layout.push(ReportBlock::Recommendation {
            priority: recommendation.priority,
            title: recommendation.course.title.clone(),
            level: recommendation.course.level,
            duration: recommendation.course.duration.clone(),
            description: recommendation.course.description.clone(),
            reason: recommendation.reason.clone(),
        });
    }

    layout.ensure_space(NEXT_STEPS_BREAK);
    layout.push(ReportBlock::NextSteps {
        steps: NEXT_STEPS.iter().map(|step| step.to_string()).collect(),
    });

    layout.push(ReportBlock::Footer {
        message: format!("Thank you for using {PLATFORM_NAME}!"),
    });

    layout.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{AssessmentResult, MeasuredLevel, ResultId};
    use crate::assessment::recommendation::recommend;
    use crate::catalog::Catalog;
    use crate::students::domain::{Student, StudentId};
    use chrono::{TimeZone, Utc};

    fn data_with_percentage(percentage: f32) -> ReportData {
        let catalog = Catalog::standard();
        let measured = MeasuredLevel::from_percentage(percentage);
        let recommendations = recommend(&catalog, measured, None).expect("valid table");

        ReportData {
            student: Student {
                id: StudentId(1),
                name: "Luis Romero".to_string(),
                email: "luis@example.com".to_string(),
                phone: None,
                age: Some(30),
                education_level: None,
                declared_level: None,
                registered_at: Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
            },
            result: AssessmentResult {
                id: ResultId(9),
                student_id: StudentId(1),
                answers: Vec::new(),
                score: (percentage / 10.0) as u32,
                total_questions: 10,
                percentage,
                measured_level: measured,
                declared_level: None,
                recommendations,
                completed_at: Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap(),
            },
        }
    }

    #[test]
    fn score_bands_preserve_the_original_thresholds() {
        assert_eq!(ScoreBand::from_percentage(70.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_percentage(69.9), ScoreBand::Steady);
        assert_eq!(ScoreBand::from_percentage(40.0), ScoreBand::Steady);
        assert_eq!(ScoreBand::from_percentage(39.9), ScoreBand::NeedsWork);
    }

    #[test]
    fn document_carries_all_sections_in_order() {
        let document = render_document(&data_with_percentage(80.0));
        let blocks: Vec<&ReportBlock> = document
            .pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .collect();

        assert!(matches!(blocks[0], ReportBlock::Header { .. }));
        assert!(matches!(blocks[1], ReportBlock::StudentInfo { .. }));
        assert!(matches!(blocks[2], ReportBlock::ScoreSummary { .. }));
        assert!(matches!(blocks.last(), Some(ReportBlock::Footer { .. })));

        let recommendation_count = blocks
            .iter()
            .filter(|block| matches!(block, ReportBlock::Recommendation { .. }))
            .count();
        assert_eq!(recommendation_count, 3);
    }

    #[test]
    fn pages_are_numbered_sequentially_and_never_overflow() {
        let document = render_document(&data_with_percentage(30.0));
        for (index, page) in document.pages.iter().enumerate() {
            assert_eq!(page.number, index + 1);
            let used: f32 = TOP_MARGIN + page.blocks.iter().map(ReportBlock::height).sum::<f32>();
            assert!(
                used <= PAGE_HEIGHT,
                "page {} overflows its budget",
                page.number
            );
            assert!(!page.blocks.is_empty());
        }
    }

    #[test]
    fn score_summary_reflects_the_band() {
        let document = render_document(&data_with_percentage(30.0));
        let summary = document
            .pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .find_map(|block| match block {
                ReportBlock::ScoreSummary { band, .. } => Some(*band),
                _ => None,
            })
            .expect("score summary present");
        assert_eq!(summary, ScoreBand::NeedsWork);
    }
}
