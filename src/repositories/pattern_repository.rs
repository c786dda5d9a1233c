// src/repositories/pattern_repository.rs
//
// The narrow interface the decoding engine needs from the reference
// dataset. Everything about the dataset schema (row granularity,
// series/trim linkage, storage shape) stays behind this trait.

use std::collections::HashSet;

use crate::domain::Pattern;
use crate::error::DecodeResult;

#[cfg_attr(test, mockall::automock)]
pub trait PatternRepository: Send + Sync {
    /// Pattern rows whose WMI equals `wmi`, whose `[from_year, to_year]`
    /// range contains `model_year` (no year filter when `None`), and whose
    /// VDS regular expression matches `vds` anchored at the start.
    ///
    /// Rows are ordered most recent `from_year` first, then most recently
    /// updated, then insertion order - the precedence the merge step
    /// relies on.
    fn find_patterns(
        &self,
        wmi: &str,
        model_year: Option<i32>,
        vds: &str,
    ) -> DecodeResult<Vec<Pattern>>;

    /// The single make produced exclusively by this WMI across all known
    /// patterns. `None` when the WMI maps to zero or multiple makes - an
    /// ambiguous fallback is worse than no answer.
    fn find_make_for_wmi(&self, wmi: &str) -> DecodeResult<Option<String>>;

    /// WMIs classified as passenger-car or light-truck manufacturers,
    /// used only for model-year disambiguation.
    fn cars_and_light_trucks_wmis(&self) -> DecodeResult<HashSet<String>>;
}
