use std::collections::HashMap;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::csv_reader::{read_data, Record};
use crate::error::Result;

/// The census table, loaded once and never mutated.
pub struct CensusDataSet {
    records: Vec<Record>,
}

impl CensusDataSet {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(CensusDataSet::from_records(read_data(path)?))
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        CensusDataSet { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// A view over every row.
    pub fn all(&self) -> Subset<'_> {
        Subset {
            rows: self.records.iter().collect(),
        }
    }

    pub fn filter<F>(&self, pred: F) -> Subset<'_>
    where
        F: Fn(&Record) -> bool,
    {
        self.all().filter(pred)
    }

    /// Splits the table into rows matching `pred` and the rest.
    pub fn partition<F>(&self, pred: F) -> (Subset<'_>, Subset<'_>)
    where
        F: Fn(&Record) -> bool,
    {
        let (yes, no): (Vec<&Record>, Vec<&Record>) =
            self.records.iter().partition(|r| pred(r));
        (Subset { rows: yes }, Subset { rows: no })
    }
}

/// Read-only view of a selection of rows.
#[derive(Clone)]
pub struct Subset<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> Subset<'a> {
    pub fn filter<F>(&self, pred: F) -> Subset<'a>
    where
        F: Fn(&Record) -> bool,
    {
        Subset {
            rows: self.rows.iter().copied().filter(|r| pred(r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&Record) -> bool,
    {
        self.rows.iter().filter(|r| pred(r)).count()
    }

    /// Rows per distinct key, most frequent first. Equal counts keep the
    /// order in which their keys were first seen.
    pub fn value_counts<F>(&self, key: F) -> ValueCounts
    where
        F: Fn(&Record) -> &str,
    {
        let mut index = HashMap::<&str, usize>::new();
        let mut buckets = Vec::<(String, usize)>::new();
        for r in &self.rows {
            let k = key(*r);
            match index.get(k) {
                Some(&pos) => buckets[pos].1 += 1,
                None => {
                    index.insert(k, buckets.len());
                    buckets.push((k.to_string(), 1));
                }
            }
        }
        // stable, so first-seen order survives among ties
        buckets.sort_by(|a, b| b.1.cmp(&a.1));
        ValueCounts(buckets)
    }
}

/// Category → row count, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueCounts(Vec<(String, usize)>);

impl ValueCounts {
    pub fn get(&self, category: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(k, _)| k == category)
            .map(|&(_, n)| n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(k, n)| (k.as_str(), *n))
    }
}

impl Serialize for ValueCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, n) in &self.0 {
            map.serialize_entry(k, n)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(race: &str, education: &str, hours: u32) -> Record {
        Record {
            race: race.to_string(),
            sex: "Male".to_string(),
            age: 30,
            education: education.to_string(),
            occupation: None,
            hours_per_week: hours,
            native_country: "United-States".to_string(),
            salary: "<=50K".to_string(),
        }
    }

    fn sample() -> CensusDataSet {
        CensusDataSet::from_records(vec![
            row("Black", "HS-grad", 40),
            row("White", "Bachelors", 40),
            row("White", "Masters", 20),
            row("Asian-Pac-Islander", "HS-grad", 10),
            row("Black", "Doctorate", 60),
            row("White", "Some-college", 40),
        ])
    }

    #[test]
    fn value_counts_descending_with_first_seen_ties() {
        let ds = sample();
        let counts = ds.all().value_counts(|r| r.race.as_str());
        let order: Vec<_> = counts.iter().collect();
        assert_eq!(
            order,
            vec![("White", 3), ("Black", 2), ("Asian-Pac-Islander", 1)]
        );
        assert_eq!(counts.total(), ds.len());

        let ds = CensusDataSet::from_records(vec![row("B", "x", 1), row("A", "x", 1)]);
        let counts = ds.all().value_counts(|r| r.race.as_str());
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("B", 1), ("A", 1)]);
    }

    #[test]
    fn partition_is_disjoint_and_covers_table() {
        let ds = sample();
        let (higher, lower) = ds.partition(|r| r.education != "HS-grad");
        assert_eq!(higher.len() + lower.len(), ds.len());
        assert!(lower.iter().all(|r| r.education == "HS-grad"));
        assert!(higher.iter().all(|r| r.education != "HS-grad"));
    }

    #[test]
    fn subset_filter_chains() {
        let ds = sample();
        let white = ds.filter(|r| r.race == "White");
        let full_time = white.filter(|r| r.hours_per_week >= 40);
        assert_eq!(white.len(), 3);
        assert_eq!(full_time.len(), 2);
        assert_eq!(white.count(|r| r.education == "Masters"), 1);
    }

    #[test]
    fn value_counts_serialize_in_order() {
        let ds = sample();
        let json = serde_json::to_string(&ds.all().value_counts(|r| r.race.as_str())).unwrap();
        assert_eq!(json, r#"{"White":3,"Black":2,"Asian-Pac-Islander":1}"#);
    }
}
