use crate::workflows::matchmaking::domain::{Candidate, CandidateId};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        candidates.push(Candidate {
            id: CandidateId(row.id),
            name: normalize_text(&row.name),
            indications: normalize_text(row.indications.as_deref().unwrap_or_default()),
            technology: normalize_text(row.technology.as_deref().unwrap_or_default()),
            eligible: row.eligible.as_deref().map(parse_flag).unwrap_or(false),
        });
    }

    Ok(candidates)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    indications: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    technology: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    eligible: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "no" | "n" | "0" | "inactive"
    )
}

fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parser_understands_common_negatives() {
        for value in ["false", "No", "0", " n ", "INACTIVE"] {
            assert!(!parse_flag(value), "{value} should be false");
        }
        for value in ["true", "yes", "1", "active"] {
            assert!(parse_flag(value), "{value} should be true");
        }
    }

    #[test]
    fn normalize_text_strips_invisible_characters_and_extra_spaces() {
        assert_eq!(normalize_text("\u{feff} Ultraformer \u{200b}  MPT "), "Ultraformer MPT");
    }
}
