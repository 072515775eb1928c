// src/table/merged.rs

use std::collections::HashMap;

use super::normalize::IndicatorTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub country: String,
    pub year: i32,
    /// One cell per label, in label order. `None` is a missing value.
    pub values: Vec<Option<String>>,
}

/// Wide `(Country, Year)` table accumulated from indicator tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    pub labels: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    /// Start a merged table from the first indicator, row for row.
    pub fn seed(table: IndicatorTable) -> Self {
        let rows = table
            .observations
            .into_iter()
            .map(|obs| MergedRow {
                country: obs.country,
                year: obs.year,
                values: vec![obs.value],
            })
            .collect();
        Self {
            labels: vec![table.label],
            rows,
        }
    }

    /// Header row: `Country`, `Year`, then indicator labels.
    pub fn header(&self) -> Vec<&str> {
        ["Country", "Year"]
            .into_iter()
            .chain(self.labels.iter().map(String::as_str))
            .collect()
    }

    /// `(rows, columns)` including the two key columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.labels.len() + 2)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable sort by country, then year.
    pub fn sort(&mut self) {
        self.rows
            .sort_by(|a, b| a.country.cmp(&b.country).then(a.year.cmp(&b.year)));
    }
}

/// Full outer join of `right` onto `left` on `(country, year)`.
///
/// Every key from either side survives. A key present several times on both
/// sides yields every pairing. Rows only on the left get an unset cell for
/// the new column; rows only on the right get unset cells for all of the
/// left's columns.
pub fn outer_join(left: MergedTable, right: &IndicatorTable) -> MergedTable {
    let width = left.labels.len();

    let mut index: HashMap<(&str, i32), Vec<usize>> = HashMap::new();
    for (i, obs) in right.observations.iter().enumerate() {
        index
            .entry((obs.country.as_str(), obs.year))
            .or_default()
            .push(i);
    }

    let mut matched = vec![false; right.observations.len()];
    let mut rows = Vec::with_capacity(left.rows.len() + right.observations.len());

    for row in &left.rows {
        let key = (row.country.as_str(), row.year);
        match index.get(&key) {
            Some(hits) => {
                for &i in hits {
                    matched[i] = true;
                    let mut joined = row.clone();
                    joined.values.push(right.observations[i].value.clone());
                    rows.push(joined);
                }
            }
            None => {
                let mut joined = row.clone();
                joined.values.push(None);
                rows.push(joined);
            }
        }
    }

    for (i, obs) in right.observations.iter().enumerate() {
        if matched[i] {
            continue;
        }
        let mut values = vec![None; width];
        values.push(obs.value.clone());
        rows.push(MergedRow {
            country: obs.country.clone(),
            year: obs.year,
            values,
        });
    }

    let mut labels = left.labels;
    labels.push(right.label.clone());
    MergedTable { labels, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::normalize::Observation;
    use std::collections::BTreeSet;

    fn table(label: &str, rows: &[(&str, i32, Option<&str>)]) -> IndicatorTable {
        IndicatorTable {
            label: label.to_string(),
            observations: rows
                .iter()
                .map(|&(country, year, value)| Observation {
                    country: country.to_string(),
                    year,
                    value: value.map(str::to_string),
                })
                .collect(),
        }
    }

    fn keys(t: &MergedTable) -> BTreeSet<(String, i32)> {
        t.rows.iter().map(|r| (r.country.clone(), r.year)).collect()
    }

    #[test]
    fn key_set_is_union() {
        let a = table(
            "A",
            &[("X", 2019, Some("1")), ("Y", 2020, Some("2")), ("Z", 2001, None)],
        );
        let b = table("B", &[("Y", 2020, Some("3")), ("W", 1990, Some("4"))]);

        let merged = outer_join(MergedTable::seed(a.clone()), &b);

        let expected: BTreeSet<_> = a
            .observations
            .iter()
            .chain(&b.observations)
            .map(|o| (o.country.clone(), o.year))
            .collect();
        assert_eq!(keys(&merged), expected);
        assert_eq!(merged.rows.len(), 4);
    }

    #[test]
    fn disjoint_keys_leave_other_column_unset() {
        let a = table("A", &[("X", 2019, Some("1"))]);
        let b = table("B", &[("Y", 2019, Some("2"))]);

        let mut merged = outer_join(MergedTable::seed(a), &b);
        merged.sort();

        assert_eq!(merged.header(), ["Country", "Year", "A", "B"]);
        assert_eq!(merged.rows[0].values, [Some("1".to_string()), None]);
        assert_eq!(merged.rows[1].values, [None, Some("2".to_string())]);
    }

    #[test]
    fn empty_right_adds_unset_column() {
        let a = table("A", &[("X", 2019, Some("1")), ("Y", 2019, None)]);
        let merged = outer_join(MergedTable::seed(a), &IndicatorTable::empty("B"));

        assert_eq!(merged.shape(), (2, 4));
        assert!(merged.rows.iter().all(|r| r.values[1].is_none()));
    }

    #[test]
    fn empty_left_takes_right_rows() {
        let merged = outer_join(
            MergedTable::seed(IndicatorTable::empty("A")),
            &table("B", &[("X", 2019, Some("1"))]),
        );
        assert_eq!(merged.rows[0].values, [None, Some("1".to_string())]);
    }

    #[test]
    fn duplicate_keys_pair_up() {
        let a = table("A", &[("X", 2019, Some("a1")), ("X", 2019, Some("a2"))]);
        let b = table("B", &[("X", 2019, Some("b1")), ("X", 2019, Some("b2"))]);

        let merged = outer_join(MergedTable::seed(a), &b);

        assert_eq!(merged.rows.len(), 4);
        assert!(merged.rows.iter().all(|r| r.country == "X" && r.year == 2019));
    }

    #[test]
    fn sort_orders_by_country_then_year() {
        let mut merged = MergedTable::seed(table(
            "A",
            &[("France", 2021, None), ("Chad", 2020, None), ("France", 1999, None)],
        ));
        merged.sort();
        let order: Vec<_> = merged.rows.iter().map(|r| (r.country.as_str(), r.year)).collect();
        assert_eq!(order, [("Chad", 2020), ("France", 1999), ("France", 2021)]);
    }
}
