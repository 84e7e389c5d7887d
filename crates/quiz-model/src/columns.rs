//! Column catalogue for quiz overview exports.
//!
//! Names are matched exactly after the reader has trimmed surrounding
//! whitespace from the header row.

use serde::{Deserialize, Serialize};

/// Elapsed-time phrase, e.g. `"2 dias, 5 horas"`.
pub const DURATION_SOURCE_COLUMN: &str = "Abrir para";

/// Compound open date, e.g. `"quarta-feira, 3 jan. 2024"`.
pub const DATE_SOURCE_COLUMN: &str = "Abrir o questionário";

/// Derived column holding the elapsed time in whole hours.
pub const DURATION_HOURS_COLUMN: &str = "Abrir para (hours)";

/// Derived column holding the parsed open date.
pub const DATE_COLUMN: &str = "Data";

/// The six score statistics exported per quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatColumn {
    FirstAttemptMean,
    AllAttemptsMean,
    LastAttemptMean,
    HighestAttemptMean,
    FirstAttemptMedian,
    FirstAttemptStdDev,
}

impl StatColumn {
    /// All statistic columns, in export order.
    pub const ALL: [StatColumn; 6] = [
        StatColumn::FirstAttemptMean,
        StatColumn::AllAttemptsMean,
        StatColumn::LastAttemptMean,
        StatColumn::HighestAttemptMean,
        StatColumn::FirstAttemptMedian,
        StatColumn::FirstAttemptStdDev,
    ];

    /// Header text as it appears in the export.
    pub const fn column_name(self) -> &'static str {
        match self {
            StatColumn::FirstAttemptMean => "Nota média das primeiras tentativas",
            StatColumn::AllAttemptsMean => "Nota média de todas as tentativas",
            StatColumn::LastAttemptMean => "Média das notas das últimas tentativas",
            StatColumn::HighestAttemptMean => "Média das notas das tentativas como maior nota",
            StatColumn::FirstAttemptMedian => "Nota mediana (para primeira tentativa)",
            StatColumn::FirstAttemptStdDev => "Desvio padrão (para primeira tentativa)",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            StatColumn::FirstAttemptMean => "Mean score of first attempts",
            StatColumn::AllAttemptsMean => "Mean score of all attempts",
            StatColumn::LastAttemptMean => "Mean score of last attempts",
            StatColumn::HighestAttemptMean => "Mean score of highest-graded attempts",
            StatColumn::FirstAttemptMedian => "Median score of first attempts",
            StatColumn::FirstAttemptStdDev => "Standard deviation of first attempts",
        }
    }

    /// Looks up a statistic by its exact header text.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.column_name() == name)
    }
}

/// How a catalogued column participates in cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Percentage string normalized in place to a float.
    Statistic,
    /// Elapsed-time phrase read by the duration normalizer.
    DurationSource,
    /// Compound date string read by the date normalizer.
    DateSource,
    /// Column written by the cleaner.
    Derived,
}

impl ColumnRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnRole::Statistic => "statistic",
            ColumnRole::DurationSource => "duration source",
            ColumnRole::DateSource => "date source",
            ColumnRole::Derived => "derived",
        }
    }
}

/// One entry of [`column_catalogue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub name: &'static str,
    pub role: ColumnRole,
    pub description: &'static str,
}

/// Every column the cleaner reads or writes.
pub fn column_catalogue() -> Vec<CatalogueEntry> {
    let mut entries: Vec<CatalogueEntry> = StatColumn::ALL
        .into_iter()
        .map(|column| CatalogueEntry {
            name: column.column_name(),
            role: ColumnRole::Statistic,
            description: column.description(),
        })
        .collect();
    entries.extend([
        CatalogueEntry {
            name: DURATION_SOURCE_COLUMN,
            role: ColumnRole::DurationSource,
            description: "How long the quiz stayed open (days and hours)",
        },
        CatalogueEntry {
            name: DATE_SOURCE_COLUMN,
            role: ColumnRole::DateSource,
            description: "Weekday and date the quiz was opened",
        },
        CatalogueEntry {
            name: DURATION_HOURS_COLUMN,
            role: ColumnRole::Derived,
            description: "Open duration in whole hours",
        },
        CatalogueEntry {
            name: DATE_COLUMN,
            role: ColumnRole::Derived,
            description: "Calendar date the quiz was opened",
        },
    ]);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_columns_round_trip_by_name() {
        for column in StatColumn::ALL {
            assert_eq!(StatColumn::from_column_name(column.column_name()), Some(column));
        }
        assert_eq!(StatColumn::from_column_name("Nota"), None);
    }

    #[test]
    fn catalogue_lists_sources_and_derived_columns() {
        let catalogue = column_catalogue();
        assert_eq!(catalogue.len(), 10);
        assert_eq!(
            catalogue
                .iter()
                .filter(|entry| entry.role == ColumnRole::Derived)
                .count(),
            2
        );
    }
}
