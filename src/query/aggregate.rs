//! Column summaries and month-grouped aggregation.

use crate::data::{Dataset, Field};
use crate::stats::{StatsCalculator, Summary};
use std::collections::BTreeMap;

/// Describe the column called `field`. Unknown names yield `None`.
pub fn summary(dataset: &Dataset, field: &str) -> Option<Summary> {
    let field = Field::from_name(field)?;
    match field {
        Field::Date => Some(match StatsCalculator::compute_date_stats(&dataset.dates()) {
            Some(dates) => Summary::Temporal(dates),
            // An empty date column still has a defined count.
            None => Summary::Numeric(StatsCalculator::compute_descriptive_stats(&[])),
        }),
        numeric => {
            let values = dataset.column(numeric)?;
            Some(Summary::Numeric(StatsCalculator::compute_descriptive_stats(&values)))
        }
    }
}

/// Mean value per calendar month (1-12, any year), for the months present.
pub fn group_by_month_average(dataset: &Dataset) -> BTreeMap<u32, f64> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for obs in &dataset.observations {
        groups.entry(obs.month()).or_default().push(obs.value);
    }

    groups
        .into_iter()
        .map(|(month, values)| (month, StatsCalculator::mean(&values)))
        .collect()
}
