//! Load policies from inforce.csv

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use super::{Policy, PolicyStatus};
use crate::error::{Result, ValuationError};

/// Default location of the inforce extract
pub const DEFAULT_INFORCE_PATH: &str = "data/inforce.csv";

/// Raw CSV row matching inforce.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PolicyID")]
    policy_id: u32,
    #[serde(rename = "IssueAge")]
    issue_age: u32,
    #[serde(rename = "Term")]
    term: u32,
    #[serde(rename = "SumInsured")]
    sum_insured: f64,
    #[serde(rename = "InceptionDate")]
    inception_date: String,
    #[serde(rename = "Status")]
    status: String,
}

impl CsvRow {
    fn into_policy(self) -> Result<Policy> {
        let inception_date = NaiveDate::parse_from_str(self.inception_date.trim(), "%Y-%m-%d")
            .map_err(|e| {
                ValuationError::InvalidRecord(format!(
                    "policy {}: bad InceptionDate '{}': {}",
                    self.policy_id, self.inception_date, e
                ))
            })?;

        let status = PolicyStatus::from_label(&self.status).ok_or_else(|| {
            ValuationError::InvalidRecord(format!(
                "policy {}: unknown Status: {}",
                self.policy_id, self.status
            ))
        })?;

        let policy = Policy {
            policy_id: self.policy_id,
            issue_age: self.issue_age,
            term: self.term,
            sum_insured: self.sum_insured,
            inception_date,
            status,
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Load all policies from a CSV file
pub fn load_policies<P: AsRef<Path>>(path: P) -> Result<Vec<Policy>> {
    let reader = Reader::from_path(path)?;
    collect_policies(reader)
}

/// Load policies from any reader (e.g., string buffer, network stream)
pub fn load_policies_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Policy>> {
    collect_policies(Reader::from_reader(reader))
}

/// Load policies from the default data/inforce.csv location
pub fn load_default_inforce() -> Result<Vec<Policy>> {
    load_policies(DEFAULT_INFORCE_PATH)
}

fn collect_policies<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Policy>> {
    let mut policies = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        policies.push(row.into_policy()?);
    }

    Ok(policies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PolicyID,IssueAge,Term,SumInsured,InceptionDate,Status
1,45,15,100000,2018-03-01,InForce
2,60,10,250000.50,2024-11-20,Lapsed
";

    #[test]
    fn test_load_from_reader() {
        let policies = load_policies_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(policies.len(), 2);

        let p1 = &policies[0];
        assert_eq!(p1.policy_id, 1);
        assert_eq!(p1.issue_age, 45);
        assert_eq!(p1.term, 15);
        assert_eq!(p1.inception_date, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap());
        assert!(p1.is_in_force());

        assert_eq!(policies[1].status, PolicyStatus::Lapsed);
        assert_eq!(policies[1].sum_insured, 250_000.5);
    }

    #[test]
    fn test_bad_rows_rejected() {
        let bad_date = "PolicyID,IssueAge,Term,SumInsured,InceptionDate,Status\n1,45,15,1000,01/03/2018,InForce\n";
        assert!(matches!(
            load_policies_from_reader(bad_date.as_bytes()),
            Err(ValuationError::InvalidRecord(_))
        ));

        let bad_status = "PolicyID,IssueAge,Term,SumInsured,InceptionDate,Status\n1,45,15,1000,2018-03-01,Pending\n";
        assert!(load_policies_from_reader(bad_status.as_bytes()).is_err());

        let zero_cover = "PolicyID,IssueAge,Term,SumInsured,InceptionDate,Status\n1,45,15,0,2018-03-01,InForce\n";
        assert!(matches!(
            load_policies_from_reader(zero_cover.as_bytes()),
            Err(ValuationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_load_default_inforce() {
        let policies = load_default_inforce().expect("Failed to load policies");
        assert_eq!(policies.len(), 12);
        assert!(policies.iter().any(|p| !p.is_in_force()));
        assert!(policies.iter().all(|p| p.validate().is_ok()));
    }
}
