//! Tests for table, CSV and JSON rendering of series

#[cfg(test)]
mod tests {
    use samplesize::SeriesPoint;
    use samplesize::io::report::{ReportFormat, ReportRow, render};

    fn rows() -> Vec<ReportRow> {
        vec![
            ReportRow::from(SeriesPoint {
                mde: 0.1,
                required_n: 31_234,
                ci_lower: 29_640.5,
                ci_upper: 32_827.5,
            }),
            ReportRow::from(SeriesPoint {
                mde: 0.2,
                required_n: 8_158,
                ci_lower: 7_400.0,
                ci_upper: 8_916.0,
            }),
        ]
    }

    // Tests CSV has a header and one line per point in order
    // Verified by omitting the header row
    #[test]
    fn test_csv() {
        let csv = render(&rows(), ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "mde,required_n,ci_lower,ci_upper",
                "0.1,31234,29640.5,32827.5",
                "0.2,8158,7400,8916",
            ]
        );
    }

    // Tests the simulated power column appears only when present
    // Verified by always emitting the column
    #[test]
    fn test_csv_with_simulation() {
        let mut rows = rows();
        rows[0].simulated_power = Some(0.81);

        let csv = render(&rows, ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "mde,required_n,ci_lower,ci_upper,simulated_power");
        assert_eq!(lines[1], "0.1,31234,29640.5,32827.5,0.81");
        assert_eq!(lines[2], "0.2,8158,7400,8916,");
    }

    // Tests JSON flattens points and skips absent simulation results
    // Verified by nesting the point under a key
    #[test]
    fn test_json() {
        let mut rows = rows();
        rows[1].simulated_power = Some(0.8);

        let json = render(&rows, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();

        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["required_n"], 31_234);
        assert_eq!(array[0]["ci_lower"], 29_640.5);
        assert!(array[0].get("simulated_power").is_none());
        assert_eq!(array[1]["simulated_power"], 0.8);
    }

    // Tests the table has aligned header and value rows
    // Verified by dropping the trailing newline per row
    #[test]
    fn test_table() {
        let table = render(&rows(), ReportFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("required_n"));
        assert!(!lines[0].contains("sim_power"));
        assert!(lines[1].contains("31234"));
        assert!(lines[1].contains("0.1000"));
        assert!(lines[2].contains("8158"));
        assert_eq!(lines[0].len(), lines[1].len());
    }

    // Tests table marks points without simulation results
    // Verified by leaving the cell empty
    #[test]
    fn test_table_with_partial_simulation() {
        let mut rows = rows();
        rows[0].simulated_power = Some(0.812);

        let table = render(&rows, ReportFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].ends_with("sim_power"));
        assert!(lines[1].ends_with("0.812"));
        assert!(lines[2].ends_with('-'));
    }

    // Tests empty series render headers only
    // Verified by failing on empty input
    #[test]
    fn test_empty() {
        assert_eq!(
            render(&[], ReportFormat::Csv).unwrap(),
            "mde,required_n,ci_lower,ci_upper\n"
        );
        assert_eq!(render(&[], ReportFormat::Json).unwrap(), "[]");
    }
}
