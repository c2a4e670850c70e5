//! Display-label rules for the three drill-down levels.

/// Measure labels longer than this many characters get truncated.
pub const MEASURE_LABEL_MAX_CHARS: usize = 40;
/// Characters kept from a truncated measure label, before the ellipsis.
pub const MEASURE_LABEL_KEEP_CHARS: usize = 37;
pub const ELLIPSIS: &str = "...";

/// Which formatting rule applies to a set of bar labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Sector,
    Subsector,
    Measure,
}

impl LabelKind {
    #[must_use]
    pub fn format(self, raw: &str) -> String {
        match self {
            Self::Sector => format_sector_name(raw),
            Self::Subsector => format_subsector_name(raw),
            Self::Measure => format_measure_name(raw),
        }
    }

    /// Label shown on hover. Sector-like labels show the cleaned name,
    /// measures show the untruncated source name.
    #[must_use]
    pub fn full_label(self, raw: &str) -> String {
        match self {
            Self::Sector | Self::Subsector => self.format(raw),
            Self::Measure => raw.to_owned(),
        }
    }
}

/// Drops a single-letter sector code such as `"C "` from `"C Industrie"`.
#[must_use]
pub fn format_sector_name(sector: &str) -> String {
    let mut chars = sector.chars();
    let stripped = match chars.next() {
        Some(code) if code.is_ascii_uppercase() => strip_leading_whitespace(chars.as_str()),
        _ => None,
    };
    stripped.unwrap_or(sector).trim().to_owned()
}

/// Drops a numeric subsector code such as `"10 "` from
/// `"10 Vervaardiging van voedingsmiddelen"`.
#[must_use]
pub fn format_subsector_name(subsector: &str) -> String {
    let rest = subsector.trim_start_matches(|c: char| c.is_ascii_digit());
    let stripped = if rest.len() < subsector.len() {
        strip_leading_whitespace(rest)
    } else {
        None
    };
    stripped.unwrap_or(subsector).trim().to_owned()
}

/// Truncates long measure names to a fixed display width.
#[must_use]
pub fn format_measure_name(measure: &str) -> String {
    if measure.chars().count() <= MEASURE_LABEL_MAX_CHARS {
        return measure.to_owned();
    }
    let mut truncated: String = measure.chars().take(MEASURE_LABEL_KEEP_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

// Requires at least one whitespace char; `None` means the prefix did not match.
fn strip_leading_whitespace(input: &str) -> Option<&str> {
    let rest = input.trim_start();
    (rest.len() < input.len()).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::{LabelKind, format_measure_name, format_sector_name, format_subsector_name};

    #[test]
    fn sector_code_prefix_is_removed() {
        assert_eq!(format_sector_name("C Industrie"), "Industrie");
        assert_eq!(format_sector_name("A  Landbouw "), "Landbouw");
    }

    #[test]
    fn sector_without_code_is_only_trimmed() {
        assert_eq!(format_sector_name(" Industrie "), "Industrie");
        assert_eq!(format_sector_name("Cindustrie"), "Cindustrie");
        assert_eq!(format_sector_name("c Industrie"), "c Industrie");
        assert_eq!(format_sector_name("AB Landbouw"), "AB Landbouw");
    }

    #[test]
    fn subsector_number_prefix_is_removed() {
        assert_eq!(
            format_subsector_name("10 Vervaardiging van voedingsmiddelen"),
            "Vervaardiging van voedingsmiddelen"
        );
        assert_eq!(format_subsector_name("24 Basismetaal"), "Basismetaal");
    }

    #[test]
    fn subsector_without_number_prefix_is_unchanged() {
        assert_eq!(format_subsector_name("Chemie"), "Chemie");
        assert_eq!(format_subsector_name("2024"), "2024");
        assert_eq!(format_subsector_name("10-12 Voeding"), "10-12 Voeding");
    }

    #[test]
    fn measure_names_truncate_past_forty_chars() {
        let exact = "a".repeat(40);
        assert_eq!(format_measure_name(&exact), exact);

        let long = "b".repeat(41);
        let formatted = format_measure_name(&long);
        assert_eq!(formatted, format!("{}...", "b".repeat(37)));
        assert_eq!(formatted.chars().count(), 40);
    }

    #[test]
    fn measure_truncation_counts_characters_not_bytes() {
        let long = "é".repeat(45);
        let formatted = format_measure_name(&long);
        assert_eq!(formatted.chars().count(), 40);
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn full_label_keeps_untruncated_measure_name() {
        let long = "Subsidieregeling energiebesparing en duurzame warmte";
        assert_eq!(LabelKind::Measure.full_label(long), long);
        assert_eq!(LabelKind::Sector.full_label("C Industrie"), "Industrie");
    }
}
