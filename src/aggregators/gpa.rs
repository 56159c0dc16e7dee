use std::collections::BTreeMap;

use crate::aggregators::credits::CreditRegistry;
use crate::aggregators::grade_points::{letter_grade, percentage_to_gpa};
use crate::aggregators::types::{CourseGpa, GpaSummary, GradeDistribution};
use crate::aggregators::utility::{mean, round_to};
use crate::models::{Grade, RecordId};

/// Returns `(Σ percentage × weight, Σ weight)` for a set of grades.
fn weighted_totals<'a, I>(grades: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Grade>,
{
    grades.into_iter().fold((0.0, 0.0), |(score, weight), g| {
        (score + g.percentage() * g.weight, weight + g.weight)
    })
}

/// Weighted course percentage: Σ(percentage × weight) / Σ(weight).
///
/// Returns 0.0 when the grades carry no weight (including no grades at all).
pub fn course_weighted_percentage<'a, I>(grades: I) -> f64
where
    I: IntoIterator<Item = &'a Grade>,
{
    let (score, weight) = weighted_totals(grades);
    if weight > 0.0 { score / weight } else { 0.0 }
}

/// Groups grades by course and computes the credit-weighted GPA.
///
/// A course only contributes when its grades carry a positive total weight.
/// Each contributing course adds `grade_points × credits`; the sum is divided
/// by the total contributing credits and rounded to two decimals.
pub fn gpa_breakdown(grades: &[Grade], credits: &CreditRegistry) -> GpaSummary {
    let mut by_course: BTreeMap<RecordId, Vec<&Grade>> = BTreeMap::new();
    for grade in grades {
        by_course.entry(grade.course_id).or_default().push(grade);
    }

    let mut total_points = 0.0;
    let mut total_credits = 0u32;
    let mut courses = Vec::with_capacity(by_course.len());

    for (course_id, course_grades) in by_course {
        let (score, weight) = weighted_totals(course_grades.iter().copied());
        if weight <= 0.0 {
            continue;
        }

        let percentage = score / weight;
        let grade_points = percentage_to_gpa(percentage);
        let course_credits = credits.credits_for(course_id);

        total_points += grade_points * course_credits as f64;
        total_credits += course_credits;

        courses.push(CourseGpa {
            course_id,
            percentage,
            grade_points,
            credits: course_credits,
        });
    }

    let gpa = if total_credits == 0 {
        0.0
    } else {
        round_to(total_points / total_credits as f64, 2)
    };

    GpaSummary {
        gpa,
        total_credits,
        courses,
    }
}

/// Overall credit-weighted GPA, or 0.0 when nothing contributes.
pub fn calculate_gpa(grades: &[Grade], credits: &CreditRegistry) -> f64 {
    gpa_breakdown(grades, credits).gpa
}

/// Like [`calculate_gpa`] but returns `None` when there is no data to
/// average, so callers can tell "no grades" apart from a 0.00 GPA.
pub fn try_calculate_gpa(grades: &[Grade], credits: &CreditRegistry) -> Option<f64> {
    let summary = gpa_breakdown(grades, credits);
    (summary.total_credits > 0).then_some(summary.gpa)
}

/// Grade points for the grades of a single course.
pub fn course_grade_points<'a, I>(grades: I) -> f64
where
    I: IntoIterator<Item = &'a Grade>,
{
    percentage_to_gpa(course_weighted_percentage(grades))
}

/// Unweighted mean of every item's percentage.
pub fn average_percentage(grades: &[Grade]) -> f64 {
    let percentages: Vec<f64> = grades.iter().map(Grade::percentage).collect();
    mean(&percentages)
}

pub fn grade_distribution(grades: &[Grade]) -> GradeDistribution {
    let mut dist = GradeDistribution::default();
    for grade in grades {
        match letter_grade(grade.percentage()) {
            "A" => dist.a += 1,
            "B" => dist.b += 1,
            "C" => dist.c += 1,
            "D" => dist.d += 1,
            _ => dist.f += 1,
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(course_id: RecordId, score: f64, weight: f64) -> Grade {
        Grade::new(course_id, "item", score, 100.0, weight)
    }

    #[test]
    fn test_empty_grades() {
        let registry = CreditRegistry::default();
        assert_eq!(calculate_gpa(&[], &registry), 0.0);
        assert_eq!(try_calculate_gpa(&[], &registry), None);
        assert_eq!(course_weighted_percentage(&Vec::<Grade>::new()), 0.0);
    }

    #[test]
    fn test_single_course_weighted_percentage() {
        let grades = vec![grade(1, 90.0, 0.5), grade(1, 80.0, 0.5)];
        assert_eq!(course_weighted_percentage(&grades), 85.0);
        assert_eq!(course_grade_points(&grades), 2.7);
    }

    #[test]
    fn test_weights_shift_percentage() {
        let grades = vec![grade(1, 100.0, 0.75), grade(1, 60.0, 0.25)];
        assert_eq!(course_weighted_percentage(&grades), 90.0);
    }

    #[test]
    fn test_gpa_is_credit_weighted() {
        // Course 1: 98% -> 4.0 over 4 credits; course 2: 75% -> 1.7 over 1 credit.
        let grades = vec![grade(1, 98.0, 1.0), grade(2, 75.0, 1.0)];
        let registry = CreditRegistry::new(3).with_credits(1, 4).with_credits(2, 1);

        // (4.0 * 4 + 1.7 * 1) / 5 = 3.54
        assert_eq!(calculate_gpa(&grades, &registry), 3.54);
    }

    #[test]
    fn test_unknown_course_uses_registry_fallback() {
        let grades = vec![grade(1, 98.0, 1.0), grade(9, 50.0, 1.0)];
        let registry = CreditRegistry::new(3).with_credits(1, 3);

        // (4.0 * 3 + 0.0 * 3) / 6 = 2.0
        let summary = gpa_breakdown(&grades, &registry);
        assert_eq!(summary.gpa, 2.0);
        assert_eq!(summary.total_credits, 6);
        assert_eq!(summary.courses.len(), 2);
        assert_eq!(summary.courses[1].course_id, 9);
        assert_eq!(summary.courses[1].credits, 3);
    }

    #[test]
    fn test_weightless_course_is_skipped() {
        let grades = vec![grade(1, 90.0, 1.0), grade(2, 10.0, 0.0)];
        let registry = CreditRegistry::default();

        let summary = gpa_breakdown(&grades, &registry);
        assert_eq!(summary.courses.len(), 1);
        assert_eq!(summary.gpa, 3.3);
    }

    #[test]
    fn test_zero_credit_courses_yield_zero() {
        let grades = vec![grade(1, 90.0, 1.0)];
        let registry = CreditRegistry::new(0);

        assert_eq!(calculate_gpa(&grades, &registry), 0.0);
        assert_eq!(try_calculate_gpa(&grades, &registry), None);
    }

    #[test]
    fn test_gpa_rounded_to_two_decimals() {
        // (3.7 * 3 + 3.3 * 3 + 2.7 * 3) / 9 = 3.2333...
        let grades = vec![grade(1, 94.0, 1.0), grade(2, 91.0, 1.0), grade(3, 84.0, 1.0)];
        assert_eq!(calculate_gpa(&grades, &CreditRegistry::default()), 3.23);
    }

    #[test]
    fn test_average_and_distribution() {
        let grades = vec![
            grade(1, 95.0, 0.2),
            grade(1, 85.0, 0.2),
            grade(2, 72.0, 0.2),
            grade(2, 40.0, 0.2),
        ];

        assert_eq!(average_percentage(&grades), 73.0);
        let dist = grade_distribution(&grades);
        assert_eq!(dist.a, 1);
        assert_eq!(dist.b, 1);
        assert_eq!(dist.c, 1);
        assert_eq!(dist.d, 0);
        assert_eq!(dist.f, 1);
    }
}
