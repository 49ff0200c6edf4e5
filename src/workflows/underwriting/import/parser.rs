use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct FeedRow {
    #[serde(
        rename = "Last Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) last_name: Option<String>,
    #[serde(rename = "Age", default, deserialize_with = "empty_string_as_none")]
    pub(crate) age: Option<String>,
    #[serde(
        rename = "Gross Annual Income",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) gross_annual_income: Option<String>,
    #[serde(
        rename = "Frequent Flyer Number",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) frequent_flyer_number: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<FeedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for row in csv_reader.deserialize::<FeedRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}
