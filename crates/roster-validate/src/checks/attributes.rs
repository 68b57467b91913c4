//! Client attribute documents (V5).

use roster_model::{DatasetSet, Issue, RuleCode, Severity};

const ATTRIBUTES_COLUMN: &str = "AttributesJSON";

/// Check that AttributesJSON, when filled in, is a well-formed JSON document.
pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    let Some(clients) = datasets.clients() else {
        return Vec::new();
    };

    clients
        .views()
        .filter_map(|(row, view)| {
            let error = view.json_document(ATTRIBUTES_COLUMN).err()?;
            Some(
                Issue::new(
                    RuleCode::V5,
                    Severity::Error,
                    clients.kind(),
                    format!("{ATTRIBUTES_COLUMN} could not be parsed ({error})"),
                )
                .with_row(row)
                .with_column(ATTRIBUTES_COLUMN)
                .with_value(error.raw())
                .with_suggestion(
                    "Write the attributes as a JSON object such as {\"key\": \"value\"}",
                ),
            )
        })
        .collect()
}
