//! Tests for design defaults, builders, validation and override merging

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use samplesize::io::configuration::{
        DEFAULT_COMPARISON_COUNT, DEFAULT_POWER, DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_TRAFFIC_SPLIT,
    };
    use samplesize::{DesignOverrides, Tails, TestDesignParameters};

    // Tests new applies documented defaults
    // Verified by changing the default power
    #[test]
    fn test_defaults() {
        let design = TestDesignParameters::new(0.05);

        assert_relative_eq!(design.baseline_rate(), 0.05);
        assert_relative_eq!(design.power(), DEFAULT_POWER);
        assert_relative_eq!(design.significance_level(), DEFAULT_SIGNIFICANCE_LEVEL);
        assert_eq!(design.tails(), Tails::TwoSided);
        assert_eq!(design.comparison_count(), DEFAULT_COMPARISON_COUNT);
        assert_relative_eq!(design.traffic_split(), DEFAULT_TRAFFIC_SPLIT);
        assert_eq!(design.baseline_observations(), None);
        assert!(design.validate().is_ok());
    }

    // Tests builders replace one field and leave the original untouched
    // Verified by having a builder write to the wrong field
    #[test]
    fn test_builders_return_new_values() {
        let base = TestDesignParameters::new(0.1);
        let tuned = base
            .with_power(0.9)
            .with_significance_level(0.01)
            .with_tails(Tails::OneSided)
            .with_comparison_count(4)
            .with_traffic_split(0.3)
            .with_baseline_observations(Some(5000));

        assert_relative_eq!(base.power(), DEFAULT_POWER);
        assert_relative_eq!(tuned.power(), 0.9);
        assert_relative_eq!(tuned.significance_level(), 0.01);
        assert_eq!(tuned.tails(), Tails::OneSided);
        assert_eq!(tuned.comparison_count(), 4);
        assert_relative_eq!(tuned.traffic_split(), 0.3);
        assert_eq!(tuned.baseline_observations(), Some(5000));
    }

    // Tests Bonferroni correction divides alpha by the comparison count
    // Verified by multiplying instead of dividing
    #[test]
    fn test_adjusted_significance_level() {
        let design = TestDesignParameters::new(0.1)
            .with_significance_level(0.06)
            .with_comparison_count(3);
        assert_relative_eq!(design.adjusted_significance_level(), 0.02, max_relative = 1e-12);

        let single = TestDesignParameters::new(0.1);
        assert_relative_eq!(single.adjusted_significance_level(), 0.05);
    }

    // Tests each constraint names its own field when violated alone
    // Verified by removing the power check
    #[test]
    fn test_validation_names_field() {
        let base = TestDesignParameters::new(0.1);
        let cases = [
            (TestDesignParameters::new(0.0), "baseline_rate"),
            (TestDesignParameters::new(1.0), "baseline_rate"),
            (TestDesignParameters::new(f64::NAN), "baseline_rate"),
            (base.with_significance_level(0.0), "significance_level"),
            (base.with_significance_level(1.0), "significance_level"),
            (base.with_power(0.0), "power"),
            (base.with_power(1.2), "power"),
            (base.with_comparison_count(0), "comparison_count"),
            (base.with_traffic_split(0.0), "traffic_split"),
            (base.with_traffic_split(1.0), "traffic_split"),
            (base.with_baseline_observations(Some(0)), "baseline_observations"),
        ];

        for (design, field) in cases {
            let err = design.validate().unwrap_err();
            assert_eq!(err.field(), Some(field), "{design:?}");
        }
    }

    // Tests merge prefers fields present in the second set
    // Verified by swapping the order of precedence
    #[test]
    fn test_merge_precedence() {
        let file = DesignOverrides {
            baseline_rate: Some(0.05),
            power: Some(0.9),
            comparison_count: Some(2),
            ..DesignOverrides::default()
        };
        let flags = DesignOverrides {
            power: Some(0.95),
            tails: Some(Tails::OneSided),
            ..DesignOverrides::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.baseline_rate, Some(0.05));
        assert_eq!(merged.power, Some(0.95));
        assert_eq!(merged.comparison_count, Some(2));
        assert_eq!(merged.tails, Some(Tails::OneSided));
        assert_eq!(merged.traffic_split, None);
    }

    // Tests resolve fills defaults and requires a baseline
    // Verified by defaulting the baseline rate
    #[test]
    fn test_resolve() {
        let design = DesignOverrides {
            baseline_rate: Some(0.2),
            traffic_split: Some(0.4),
            ..DesignOverrides::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(
            design,
            TestDesignParameters::new(0.2).with_traffic_split(0.4)
        );

        let err = DesignOverrides::default().resolve().unwrap_err();
        assert_eq!(err.field(), Some("baseline_rate"));
    }

    // Tests resolve defers value checks to validation
    // Verified by validating inside resolve
    #[test]
    fn test_resolve_does_not_validate_values() {
        let design = DesignOverrides {
            baseline_rate: Some(0.2),
            power: Some(2.0),
            ..DesignOverrides::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(design.validate().unwrap_err().field(), Some("power"));
    }
}
