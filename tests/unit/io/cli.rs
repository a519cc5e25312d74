//! Tests for command-line parsing and sizing runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use samplesize::io::cli::{Cli, SizingRun};
    use samplesize::io::configuration::DEFAULT_SEED;
    use samplesize::io::report::ReportFormat;
    use samplesize::{EffectSpecification, Tails, TestDesignParameters};
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("samplesize").chain(args.iter().copied()))
    }

    // Tests CLI parsing with only a baseline and one effect
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = parse(&["--baseline", "0.05", "--mde", "10"]);

        assert_eq!(cli.baseline, Some(0.05));
        assert_eq!(cli.mde, vec![10.0]);
        assert_eq!(cli.power, None);
        assert!(!cli.one_sided);
        assert!(!cli.absolute);
        assert_eq!(cli.format, ReportFormat::Table);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!(cli.simulation().is_none());
    }

    // Tests short flags and comma-separated effects
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = parse(&[
            "-b", "0.1", "-p", "0.9", "-a", "0.01", "-k", "3", "-s", "0.4", "-m", "5,10,-15", "-f",
            "csv",
        ]);

        let design = cli.overrides().resolve().unwrap();
        assert_eq!(
            design,
            TestDesignParameters::new(0.1)
                .with_power(0.9)
                .with_significance_level(0.01)
                .with_comparison_count(3)
                .with_traffic_split(0.4)
        );
        assert_eq!(cli.mde, vec![5.0, 10.0, -15.0]);
        assert_eq!(cli.format, ReportFormat::Csv);
    }

    // Tests percent effects convert to fractions in the chosen convention
    // Verified by skipping the percent conversion
    #[test]
    fn test_effects_conventions() {
        let relative = parse(&["-b", "0.05", "--mde", "10", "--sweep", "5", "20", "5"]);
        assert_eq!(
            relative.effects().unwrap(),
            vec![
                EffectSpecification::Relative(0.1),
                EffectSpecification::Relative(0.05),
                EffectSpecification::Relative(0.1),
                EffectSpecification::Relative(0.15),
                EffectSpecification::Relative(0.2),
            ]
        );

        let absolute = parse(&["-b", "0.05", "--mde", "0.5", "--absolute"]);
        assert_eq!(
            absolute.effects().unwrap(),
            vec![EffectSpecification::Absolute(0.005)]
        );
    }

    // Tests malformed sweeps and missing effects are rejected
    // Verified by accepting a zero step
    #[test]
    fn test_effects_errors() {
        let none = parse(&["-b", "0.05"]);
        assert_eq!(none.effects().unwrap_err().field(), Some("mde"));

        let zero_step = parse(&["-b", "0.05", "--sweep", "5", "20", "0"]);
        assert_eq!(zero_step.effects().unwrap_err().field(), Some("sweep"));

        let reversed = parse(&["-b", "0.05", "--sweep", "20", "5", "1"]);
        assert_eq!(reversed.effects().unwrap_err().field(), Some("sweep"));

        let huge = parse(&["-b", "0.05", "--sweep", "1", "1000000", "1"]);
        assert_eq!(huge.effects().unwrap_err().field(), Some("sweep"));
    }

    // Tests a vanishing step is rejected rather than overflowing the point count
    // Verified by casting the count to usize before the limit check
    #[test]
    fn test_sweep_with_tiny_step() {
        let tiny = parse(&["-b", "0.05", "--sweep", "0", "1", "1e-300"]);
        assert_eq!(tiny.effects().unwrap_err().field(), Some("sweep"));

        let at_limit = parse(&["-b", "0.05", "--sweep", "1", "10000", "1"]);
        assert_eq!(at_limit.effects().unwrap().len(), 10_000);
    }

    // Tests one-sided flag and simulation settings
    // Verified by ignoring the seed flag
    #[test]
    fn test_one_sided_and_simulation() {
        let cli = parse(&[
            "-b", "0.05", "-m", "10", "--one-sided", "--simulate", "250", "--seed", "7",
        ]);

        assert_eq!(cli.overrides().tails, Some(Tails::OneSided));
        let simulation = cli.simulation().unwrap();
        assert_eq!(simulation.trials, 250);
        assert_eq!(simulation.seed, 7);
    }

    // Tests --two-sided restores a two-sided test over a one-sided design file
    // Verified by leaving tails unset when --two-sided is given
    #[test]
    fn test_two_sided_overrides_design_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("design.toml");
        fs::write(&path, "baseline_rate = 0.05\ntails = \"one-sided\"\n").unwrap();
        let config = path.to_str().unwrap();

        let from_file = SizingRun::new(parse(&["-c", config, "-m", "10"])).unwrap();
        assert_eq!(from_file.design().unwrap().tails(), Tails::OneSided);

        let overridden =
            SizingRun::new(parse(&["-c", config, "--two-sided", "-m", "10"])).unwrap();
        assert_eq!(overridden.design().unwrap().tails(), Tails::TwoSided);

        let both = Cli::try_parse_from(["samplesize", "--one-sided", "--two-sided"]);
        assert!(both.is_err());
    }

    // Tests a full run renders one CSV row per effect
    // Verified by rendering the table regardless of format
    #[test]
    fn test_run_csv() {
        let run = SizingRun::new(parse(&["-b", "0.05", "-m", "10,20", "-f", "csv"])).unwrap();
        let output = run.run().unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0.1,31234,"));
        assert!(lines[2].starts_with("0.2,8158,"));
    }

    // Tests runs fail without a baseline
    // Verified by defaulting the baseline
    #[test]
    fn test_run_requires_baseline() {
        let run = SizingRun::new(parse(&["-m", "10"])).unwrap();
        assert_eq!(run.run().unwrap_err().field(), Some("baseline_rate"));
    }

    // Tests design files fill in what flags leave unset, and flags win
    // Verified by letting the file override flags
    #[test]
    fn test_design_file_merging() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("design.toml");
        fs::write(&path, "baseline_rate = 0.2\npower = 0.9\ncomparison_count = 2\n").unwrap();
        let config = path.to_str().unwrap();

        let run = SizingRun::new(parse(&["-c", config, "-p", "0.85", "-m", "10"])).unwrap();
        let design = run.design().unwrap();

        assert_eq!(
            design,
            TestDesignParameters::new(0.2)
                .with_power(0.85)
                .with_comparison_count(2)
        );
    }

    // Tests runs write the chart when requested
    // Verified by skipping chart export
    #[test]
    fn test_run_writes_chart() {
        let temp_dir = TempDir::new().unwrap();
        let chart = temp_dir.path().join("curve.png");
        let chart_arg = chart.to_str().unwrap();

        let run = SizingRun::new(parse(&[
            "-b", "0.1", "--sweep", "10", "50", "10", "--chart", chart_arg,
        ]))
        .unwrap();
        run.run().unwrap();

        assert!(chart.exists());
    }

    // Tests simulated power is reported for every point
    // Verified by simulating only the first point
    #[test]
    fn test_run_with_simulation() {
        let run = SizingRun::new(parse(&[
            "-b", "0.2", "-m", "50,80", "--simulate", "100", "-f", "json",
        ]))
        .unwrap();
        let output = run.run().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        for row in value.as_array().unwrap() {
            let power = row["simulated_power"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&power));
        }
    }
}
