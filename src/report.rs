//! The demographic report: ten aggregate metrics over one census table.
//!
//! Every metric reads the same immutable [`CensusDataSet`]; none depends on
//! another, so they are evaluated in presentation order. Percentages are
//! rounded to one decimal with ties going to the even digit.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::csv_reader::Record;
use crate::dataset::{CensusDataSet, Subset, ValueCounts};
use crate::error::{ReportError, Result};
use crate::stats::{mean, mode, percentage, round1};

/// Location of the census extract when no other path is configured.
pub const CSV_FILE_PATH: &str = "adult.data.csv";

const HIGHER_EDUCATION: &[&str] = &["Bachelors", "Masters", "Doctorate"];
const RICH: &str = ">50K";

/// Result keys, in presentation order.
pub const METRIC_KEYS: [&str; 10] = [
    "race_count",
    "average_age_men",
    "percentage_bachelors",
    "higher_education_rich",
    "lower_education_rich",
    "min_work_hours",
    "rich_percentage",
    "highest_earning_country",
    "highest_earning_country_percentage",
    "top_IN_occupation",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicData {
    pub race_count: ValueCounts,
    pub average_age_men: f64,
    pub percentage_bachelors: f64,
    pub higher_education_rich: f64,
    pub lower_education_rich: f64,
    pub min_work_hours: u32,
    pub rich_percentage: f64,
    pub highest_earning_country: String,
    pub highest_earning_country_percentage: f64,
    #[serde(rename = "top_IN_occupation")]
    pub top_in_occupation: String,
}

fn is_rich(r: &Record) -> bool {
    r.salary == RICH
}

fn rich_share(subset: &Subset<'_>, metric: &'static str, name: &'static str) -> Result<f64> {
    debug!("{}: {} rows in {}", metric, subset.len(), name);
    percentage(subset.count(is_rich), subset.len())
        .map(round1)
        .ok_or_else(|| ReportError::empty(metric, name))
}

impl DemographicData {
    pub fn from_dataset(ds: &CensusDataSet) -> Result<Self> {
        if ds.is_empty() {
            return Err(ReportError::empty("census table", "census table"));
        }
        let all = ds.all();

        let race_count = all.value_counts(|r| r.race.as_str());

        let men = ds.filter(|r| r.sex == "Male");
        let average_age_men = mean(men.iter().map(|r| r.age))
            .map(round1)
            .ok_or_else(|| ReportError::empty("average_age_men", "male rows"))?;

        let percentage_bachelors = percentage(all.count(|r| r.education == "Bachelors"), all.len())
            .map(round1)
            .ok_or_else(|| ReportError::empty("percentage_bachelors", "census table"))?;

        let (higher, lower) = ds.partition(|r| HIGHER_EDUCATION.contains(&r.education.as_str()));
        let higher_education_rich = rich_share(&higher, "higher_education_rich", "higher education rows")?;
        let lower_education_rich = rich_share(&lower, "lower_education_rich", "lower education rows")?;

        let min_work_hours = all
            .iter()
            .map(|r| r.hours_per_week)
            .min()
            .ok_or_else(|| ReportError::empty("min_work_hours", "census table"))?;
        let min_workers = ds.filter(|r| r.hours_per_week == min_work_hours);
        let rich_percentage = rich_share(&min_workers, "rich_percentage", "minimum-hours rows")?;

        let (highest_earning_country, country_pct) = top_earning_country(&all)?;

        let india_rich = ds.filter(|r| r.native_country == "India" && is_rich(r));
        debug!("top_IN_occupation: {} rich rows from India", india_rich.len());
        let top_in_occupation = mode(
            india_rich
                .iter()
                .filter_map(|r| r.occupation.as_deref())
                .filter(|o| !o.is_empty()),
        )
        .map(str::to_string)
        .ok_or_else(|| ReportError::empty("top_IN_occupation", "rich rows from India"))?;

        Ok(DemographicData {
            race_count,
            average_age_men,
            percentage_bachelors,
            higher_education_rich,
            lower_education_rich,
            min_work_hours,
            rich_percentage,
            highest_earning_country,
            highest_earning_country_percentage: round1(country_pct),
            top_in_occupation,
        })
    }

    /// Writes the human-readable report, one metric per line (race counts as
    /// an indented block).
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Number of each race:")?;
        for (race, n) in self.race_count.iter() {
            writeln!(out, " {} {}", race, n)?;
        }
        writeln!(out, "Average age of men: {:.1}", self.average_age_men)?;
        writeln!(out, "Percentage with Bachelors degrees: {:.1}%", self.percentage_bachelors)?;
        writeln!(
            out,
            "Percentage with higher education that earn >50K: {:.1}%",
            self.higher_education_rich
        )?;
        writeln!(
            out,
            "Percentage without higher education that earn >50K: {:.1}%",
            self.lower_education_rich
        )?;
        writeln!(out, "Min work time: {} hours/week", self.min_work_hours)?;
        writeln!(
            out,
            "Percentage of rich among those who work fewest hours: {:.1}%",
            self.rich_percentage
        )?;
        writeln!(out, "Country with highest percentage of rich: {}", self.highest_earning_country)?;
        writeln!(
            out,
            "Highest percentage of rich people in country: {:.1}%",
            self.highest_earning_country_percentage
        )?;
        writeln!(out, "Top occupations in India: {}", self.top_in_occupation)?;
        Ok(())
    }
}

/// Country with the largest share of rich rows. Countries are scanned in
/// ascending order, so the lexically first one wins a tie. Countries without
/// rich rows count as 0%, so a table with no `>50K` row yields the lexically
/// first country at 0.0 instead of failing.
fn top_earning_country(all: &Subset<'_>) -> Result<(String, f64)> {
    let mut per_country = BTreeMap::<&str, (usize, usize)>::new();
    for r in all.iter() {
        let e = per_country.entry(r.native_country.as_str()).or_insert((0, 0));
        e.1 += 1;
        if is_rich(r) {
            e.0 += 1;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (&country, &(rich, total)) in &per_country {
        let Some(pct) = percentage(rich, total) else {
            continue;
        };
        match best {
            Some((_, top)) if pct <= top => {
                if pct == top {
                    debug!("highest_earning_country: {} ties at {:.3}%, keeping earlier", country, pct);
                }
            }
            _ => best = Some((country, pct)),
        }
    }
    best.map(|(c, p)| (c.to_string(), p))
        .ok_or_else(|| ReportError::empty("highest_earning_country", "census table"))
}

/// JSON document wrapping a computed report with its provenance.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: &'a Path,
    pub data: &'a DemographicData,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(source: &'a Path, data: &'a DemographicData) -> Self {
        ReportEnvelope {
            generated_at: Utc::now(),
            source,
            data,
        }
    }
}

/// Computes the report for the table at a given path.
pub struct DemographicReport {
    path: PathBuf,
}

impl Default for DemographicReport {
    fn default() -> Self {
        DemographicReport::new(CSV_FILE_PATH)
    }
}

impl DemographicReport {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        DemographicReport {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the table afresh and computes all ten metrics. With `print_data`
    /// the report is also written to stdout.
    pub fn compute(&self, print_data: bool) -> Result<DemographicData> {
        let dataset = CensusDataSet::load(&self.path)?;
        let data = DemographicData::from_dataset(&dataset)?;
        if print_data {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            if let Err(e) = data.write_to(&mut lock) {
                warn!("failed to print report: {}", e);
            }
        }
        Ok(data)
    }
}

/// Computes the report for [`CSV_FILE_PATH`] in the working directory.
pub fn calculate_demographic_data(print_data: bool) -> Result<DemographicData> {
    DemographicReport::default().compute(print_data)
}
