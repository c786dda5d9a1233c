// src/repositories/sqlite_pattern_repository.rs
//
// SQLite-backed pattern repository.
//
// The WMI and year-range filters run in SQL; VDS regex evaluation happens
// in-process against the pre-filtered rows, so no REGEXP extension is
// needed in the SQLite build.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use regex::Regex;
use rusqlite::{params, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::Pattern;
use crate::error::DecodeResult;
use crate::repositories::PatternRepository;

const FIND_PATTERNS_SQL: &str = "
    SELECT
        pattern.wmi,
        pattern.vds_regex,
        pattern.from_year,
        pattern.to_year,
        wmi.manufacturer,
        pattern.make,
        pattern.model,
        pattern.series,
        pattern.\"trim\",
        pattern.body_class,
        pattern.electrification_level,
        wmi.vehicle_type,
        wmi.truck_type,
        wmi.country
    FROM pattern
    JOIN wmi ON wmi.code = pattern.wmi
    WHERE pattern.wmi = ?1
      AND (?2 IS NULL OR ?2 BETWEEN pattern.from_year AND pattern.to_year)
    ORDER BY pattern.from_year DESC, pattern.updated_at DESC, pattern.id ASC";

pub struct SqlitePatternRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePatternRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a dataset row to a Pattern
    fn row_to_pattern(row: &Row) -> Result<Pattern, rusqlite::Error> {
        Ok(Pattern {
            wmi: row.get("wmi")?,
            vds_pattern: row.get("vds_regex")?,
            from_year: row.get("from_year")?,
            to_year: row.get("to_year")?,
            manufacturer: row.get("manufacturer")?,
            make: row.get("make")?,
            model: row.get("model")?,
            series: row.get("series")?,
            trim: row.get("trim")?,
            body_class: row.get("body_class")?,
            electrification_level: row.get("electrification_level")?,
            vehicle_type: row.get("vehicle_type")?,
            truck_type: row.get("truck_type")?,
            country: row.get("country")?,
        })
    }

    /// True when the stored pattern matches the VDS from position 0.
    ///
    /// Stored patterns are wrapped in `^(?:...)` so an alternation cannot
    /// escape the anchor. A pattern that fails to compile is a defective
    /// dataset row, not a reason to fail the whole lookup: it is logged
    /// and skipped.
    fn vds_matches(vds_pattern: &str, vds: &str) -> Option<bool> {
        match Regex::new(&format!("^(?:{})", vds_pattern)) {
            Ok(regex) => Some(regex.is_match(vds)),
            Err(error) => {
                warn!("Skipping malformed VDS pattern {vds_pattern:?}: {error}");
                None
            }
        }
    }
}

impl PatternRepository for SqlitePatternRepository {
    fn find_patterns(
        &self,
        wmi: &str,
        model_year: Option<i32>,
        vds: &str,
    ) -> DecodeResult<Vec<Pattern>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(FIND_PATTERNS_SQL)?;
        let candidates: Vec<Pattern> = stmt
            .query_map(params![wmi, model_year], Self::row_to_pattern)?
            .collect::<Result<Vec<_>, _>>()?;

        let matched: Vec<Pattern> = candidates
            .into_iter()
            .filter(|pattern| Self::vds_matches(&pattern.vds_pattern, vds).unwrap_or(false))
            .collect();

        debug!(
            "find_patterns wmi={wmi} year={model_year:?} vds={vds}: {} rows",
            matched.len()
        );
        Ok(matched)
    }

    fn find_make_for_wmi(&self, wmi: &str) -> DecodeResult<Option<String>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT make FROM pattern
             WHERE wmi = ?1 AND make IS NOT NULL AND make != ''",
        )?;
        let makes: Vec<String> = stmt
            .query_map(params![wmi], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        // Only an unambiguous answer is an answer
        if makes.len() == 1 {
            Ok(makes.into_iter().next())
        } else {
            Ok(None)
        }
    }

    fn cars_and_light_trucks_wmis(&self) -> DecodeResult<HashSet<String>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare("SELECT code FROM wmi WHERE is_car_or_light_truck = 1")?;
        let wmis: HashSet<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(wmis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vds_regex_is_anchored_at_the_start() {
        assert_eq!(SqlitePatternRepository::vds_matches("YF5H5", "YF5H5"), Some(true));
        // Prefix match is enough; full-match semantics are not required
        assert_eq!(SqlitePatternRepository::vds_matches("YF5", "YF5H5"), Some(true));
        // But the match must begin at position 0
        assert_eq!(SqlitePatternRepository::vds_matches("F5H5", "YF5H5"), Some(false));
        // An alternation cannot escape the anchor
        assert_eq!(SqlitePatternRepository::vds_matches("ZZ|F5", "YF5H5"), Some(false));
        assert_eq!(SqlitePatternRepository::vds_matches("ZZ|YF", "YF5H5"), Some(true));
    }

    #[test]
    fn test_malformed_pattern_is_skipped_not_fatal() {
        assert_eq!(SqlitePatternRepository::vds_matches("(unclosed", "YF5H5"), None);
    }
}
