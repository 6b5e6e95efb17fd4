use std::path::PathBuf;

use clap::Parser;
use transit_db::fixtures::Fixtures;

#[derive(Clone, Parser)]
pub struct CheckFixturesParams {
    pub path: PathBuf,
}

pub fn check_fixtures(CheckFixturesParams { path }: CheckFixturesParams) -> anyhow::Result<String> {
    let fixtures = Fixtures::from_file(&path)?;
    summarize(&fixtures)
}

fn summarize(fixtures: &Fixtures) -> anyhow::Result<String> {
    let warnings = fixtures.validate()?;

    let mut out = format!(
        "{} drivers, {} buses, {} stops, {} routes",
        fixtures.drivers.len(),
        fixtures.buses.len(),
        fixtures.stops.len(),
        fixtures.routes.len()
    );

    for warning in warnings {
        out.push_str(&format!("\nwarning: {warning}"));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fleet_summary() {
        assert_eq!(
            summarize(&Fixtures::demo()).unwrap(),
            "3 drivers, 3 buses, 4 stops, 3 routes"
        );
    }

    #[test]
    fn name_mismatch_is_reported_as_warning() {
        let mut fixtures = Fixtures::demo();
        fixtures.buses[0].driver = "Someone Else".into();

        let out = summarize(&fixtures).unwrap();
        assert!(out.contains("warning: bus 1"));
    }

    #[test]
    fn broken_reference_fails() {
        let mut fixtures = Fixtures::demo();
        fixtures.routes[0].stops.push(99);

        assert!(summarize(&fixtures).is_err());
    }
}
