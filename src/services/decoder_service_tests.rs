// src/services/decoder_service_tests.rs
//
// UNIT TESTS: Decoder Service
//
// PURPOSE:
// - Prove the year-candidate retry loop probes candidates in order
// - Prove the row merge keeps the first non-empty value per field
// - Prove the WMI-make fallback fires only when unambiguous
// - Prove decoding is deterministic for a fixed dataset snapshot
//
// The repository is mocked; dataset-backed end-to-end coverage lives in
// tests/decode.rs.

#[cfg(test)]
mod decoder_tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::domain::{DomainError, Pattern};
    use crate::error::DecodeError;
    use crate::repositories::MockPatternRepository;
    use crate::services::{DecodeOptions, DecoderService};

    const HONDA_PILOT: &str = "5FNYF5H59HB011946";
    const CHEVY_PICKUP: &str = "2GCEC19Z0S1245490";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn wmis(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn bare_pattern(wmi: &str, vds_pattern: &str, from_year: i32, to_year: i32) -> Pattern {
        Pattern {
            wmi: wmi.to_string(),
            vds_pattern: vds_pattern.to_string(),
            from_year,
            to_year,
            manufacturer: None,
            make: None,
            model: None,
            series: None,
            trim: None,
            body_class: None,
            electrification_level: None,
            vehicle_type: None,
            truck_type: None,
            country: None,
        }
    }

    fn pilot_model_row() -> Pattern {
        Pattern {
            manufacturer: Some("Honda Motor Co.".to_string()),
            make: Some("Honda".to_string()),
            model: Some("Pilot".to_string()),
            body_class: Some("SUV".to_string()),
            vehicle_type: Some("Multipurpose Passenger Vehicle".to_string()),
            country: Some("United States".to_string()),
            ..bare_pattern("5FN", "YF5H5", 2016, 2018)
        }
    }

    fn pilot_trim_row() -> Pattern {
        Pattern {
            series: Some("EX-L".to_string()),
            trim: Some("w/Navigation".to_string()),
            ..bare_pattern("5FN", "YF5H.", 2016, 2018)
        }
    }

    #[test]
    fn test_decode_merges_rows_across_granularities() {
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));
        repo.expect_find_patterns()
            .withf(|wmi: &str, year: &Option<i32>, vds: &str| {
                wmi == "5FN" && *year == Some(2017) && vds == "YF5H5"
            })
            .returning(|_, _, _| Ok(vec![pilot_model_row(), pilot_trim_row()]));

        let service = DecoderService::new(Arc::new(repo));
        let vin = service
            .decode_as_of(HONDA_PILOT, &DecodeOptions::default(), today())
            .unwrap();

        assert_eq!(vin.model_year(), 2017);
        assert_eq!(vin.make().unwrap(), Some("Honda"));
        assert_eq!(vin.model().unwrap(), Some("Pilot"));
        assert_eq!(vin.series().unwrap(), Some("EX-L"));
        assert_eq!(vin.trim().unwrap(), Some("w/Navigation"));
        assert_eq!(vin.body_class().unwrap(), Some("SUV"));
        assert_eq!(vin.electrification_level().unwrap(), None);
        assert_eq!(vin.decoded().unwrap().name(), "2017 Honda Pilot EX-L w/Navigation");
    }

    #[test]
    fn test_ambiguous_year_retries_earlier_candidate() {
        // Without WMI membership, 'S' leaves 2025 and 1995 both plausible;
        // the dataset only knows the 1995 truck
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&[])));
        repo.expect_find_patterns()
            .withf(|_: &str, year: &Option<i32>, _: &str| *year == Some(2025))
            .returning(|_, _, _| Ok(vec![]));
        repo.expect_find_patterns()
            .withf(|_: &str, year: &Option<i32>, _: &str| *year == Some(1995))
            .returning(|_, _, _| {
                Ok(vec![Pattern {
                    make: Some("Chevrolet".to_string()),
                    model: Some("C/K 1500".to_string()),
                    ..bare_pattern("2GC", "EC19Z", 1988, 1998)
                }])
            });

        let service = DecoderService::new(Arc::new(repo));
        let vin = service
            .decode_as_of(CHEVY_PICKUP, &DecodeOptions::default(), today())
            .unwrap();

        assert!(!vin.resolved_year().is_conclusive());
        assert_eq!(vin.model_year(), 1995);
        assert_eq!(vin.make().unwrap(), Some("Chevrolet"));
    }

    #[test]
    fn test_light_truck_membership_probes_only_the_rolled_back_year() {
        // 2GC is in the cars-and-light-trucks set and VDS position 7 is
        // numeric, so 1995 is conclusive; a 2025 probe would panic the mock
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["2GC"])));
        repo.expect_find_patterns()
            .withf(|wmi: &str, year: &Option<i32>, _: &str| wmi == "2GC" && *year == Some(1995))
            .returning(|_, _, _| {
                Ok(vec![Pattern {
                    make: Some("Chevrolet".to_string()),
                    ..bare_pattern("2GC", "EC19Z", 1988, 1998)
                }])
            });

        let service = DecoderService::new(Arc::new(repo));
        let vin = service
            .decode_as_of(CHEVY_PICKUP, &DecodeOptions::default(), today())
            .unwrap();

        assert!(vin.resolved_year().is_conclusive());
        assert_eq!(vin.model_year(), 1995);
    }

    #[test]
    fn test_wmi_fallback_when_no_pattern_matches() {
        // The WMI maps to exactly one make: resolution still succeeds with
        // make-only attributes instead of failing
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));
        repo.expect_find_patterns().returning(|_, _, _| Ok(vec![]));
        repo.expect_find_make_for_wmi()
            .withf(|wmi: &str| wmi == "5FN")
            .returning(|_| Ok(Some("Honda".to_string())));

        let service = DecoderService::new(Arc::new(repo));
        let vin = service
            .decode_as_of(HONDA_PILOT, &DecodeOptions::default(), today())
            .unwrap();

        assert_eq!(vin.make().unwrap(), Some("Honda"));
        assert_eq!(vin.model().unwrap(), None);
        assert_eq!(vin.series().unwrap(), None);
        assert_eq!(vin.model_year(), 2017);
    }

    #[test]
    fn test_ambiguous_wmi_fallback_fails_decoding() {
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));
        repo.expect_find_patterns().returning(|_, _, _| Ok(vec![]));
        repo.expect_find_make_for_wmi().returning(|_| Ok(None));

        let service = DecoderService::new(Arc::new(repo));
        let result = service.decode_as_of(HONDA_PILOT, &DecodeOptions::default(), today());

        assert!(matches!(result, Err(DecodeError::DecodingFailed)));
    }

    #[test]
    fn test_merged_rows_without_make_use_wmi_fallback() {
        // A trim-only match still gets its make from the WMI when that is
        // unambiguous
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));
        repo.expect_find_patterns()
            .returning(|_, _, _| Ok(vec![pilot_trim_row()]));
        repo.expect_find_make_for_wmi()
            .returning(|_| Ok(Some("Honda".to_string())));

        let service = DecoderService::new(Arc::new(repo));
        let vin = service
            .decode_as_of(HONDA_PILOT, &DecodeOptions::default(), today())
            .unwrap();

        assert_eq!(vin.make().unwrap(), Some("Honda"));
        assert_eq!(vin.series().unwrap(), Some("EX-L"));
    }

    #[test]
    fn test_skipped_resolution_reports_decoding_required() {
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));

        let service = DecoderService::new(Arc::new(repo));
        let options = DecodeOptions {
            resolve: false,
            ..DecodeOptions::default()
        };
        let vin = service.decode_as_of(HONDA_PILOT, &options, today()).unwrap();

        // Structural accessors still work
        assert_eq!(vin.wmi(), "5FN");
        assert_eq!(vin.model_year(), 2017);
        // Attribute accessors do not
        assert_eq!(vin.make(), Err(DomainError::DecodingRequired));
    }

    #[test]
    fn test_check_digit_repair_through_the_service() {
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));

        let service = DecoderService::new(Arc::new(repo));
        let options = DecodeOptions {
            repair_check_digit: true,
            resolve: false,
        };
        let vin = service
            .decode_as_of("5FNYF5H50HB011946", &options, today())
            .unwrap();

        assert_eq!(vin.as_str(), HONDA_PILOT);
    }

    #[test]
    fn test_structural_errors_pass_through() {
        let repo = MockPatternRepository::new();
        let service = DecoderService::new(Arc::new(repo));

        let result = service.decode_as_of("4T1B", &DecodeOptions::default(), today());
        assert!(matches!(
            result,
            Err(DecodeError::Domain(DomainError::InvalidLength(4)))
        ));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let mut repo = MockPatternRepository::new();
        repo.expect_cars_and_light_trucks_wmis()
            .returning(|| Ok(wmis(&["5FN"])));
        repo.expect_find_patterns()
            .returning(|_, _, _| Ok(vec![pilot_model_row(), pilot_trim_row()]));

        let service = DecoderService::new(Arc::new(repo));
        let first = service
            .decode_as_of(HONDA_PILOT, &DecodeOptions::default(), today())
            .unwrap();
        let second = service
            .decode_as_of(HONDA_PILOT, &DecodeOptions::default(), today())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_candidate_slice_runs_unconstrained_query() {
        let mut repo = MockPatternRepository::new();
        repo.expect_find_patterns()
            .withf(|wmi: &str, year: &Option<i32>, _: &str| wmi == "5FN" && year.is_none())
            .returning(|_, _, _| Ok(vec![pilot_model_row()]));

        let service = DecoderService::new(Arc::new(repo));
        let vehicle = service.resolve_attributes("5FN", "YF5H5", &[]).unwrap();

        assert_eq!(vehicle.model_year, None);
        assert_eq!(vehicle.make.as_deref(), Some("Honda"));
    }
}
