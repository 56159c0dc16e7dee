/// Converts a 0–100 course percentage into grade points.
///
/// Each tier includes its lower bound; the input is not rounded, so 92.99
/// stays in the 3.3 tier.
///
/// | Range   | Points |
/// |---------|--------|
/// | >= 97   | 4.0    |
/// | >= 93   | 3.7    |
/// | >= 90   | 3.3    |
/// | >= 87   | 3.0    |
/// | >= 83   | 2.7    |
/// | >= 80   | 2.3    |
/// | >= 77   | 2.0    |
/// | >= 73   | 1.7    |
/// | >= 70   | 1.3    |
/// | >= 67   | 1.0    |
/// | >= 60   | 0.7    |
/// | < 60    | 0.0    |
pub fn percentage_to_gpa(p: f64) -> f64 {
    match p {
        p if p >= 97.0 => 4.0,
        p if p >= 93.0 => 3.7,
        p if p >= 90.0 => 3.3,
        p if p >= 87.0 => 3.0,
        p if p >= 83.0 => 2.7,
        p if p >= 80.0 => 2.3,
        p if p >= 77.0 => 2.0,
        p if p >= 73.0 => 1.7,
        p if p >= 70.0 => 1.3,
        p if p >= 67.0 => 1.0,
        p if p >= 60.0 => 0.7,
        _ => 0.0,
    }
}

/// Letter shown next to an individual graded item.
///
/// | Range | Letter |
/// |-------|--------|
/// | >= 90 | A      |
/// | >= 80 | B      |
/// | >= 70 | C      |
/// | >= 60 | D      |
/// | < 60  | F      |
pub fn letter_grade(p: f64) -> &'static str {
    match p {
        p if p >= 90.0 => "A",
        p if p >= 80.0 => "B",
        p if p >= 70.0 => "C",
        p if p >= 60.0 => "D",
        _ => "F",
    }
}
