/// Splits the comma-separated skills input. Segments are trimmed but kept in
/// position, including empty ones; hiding empties is a rendering concern.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
