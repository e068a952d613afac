//! Example walking a profile document through every projection.
//!
//! Decodes a backend response, prints the summary tiles, the type
//! distribution, the details table and one histogram, then shows both
//! export formats.

use profile_lens::prelude::*;

const RESPONSE: &str = r#"{
  "shape": [6, 4],
  "columns": ["order_id", "region", "amount", "coupon"],
  "data_types": {"order_id": "int64", "region": "object",
                 "amount": "float64", "coupon": "object"},
  "null_values": {"order_id": 0, "region": 1, "amount": 2, "coupon": 5},
  "null_rate": {"order_id": 0.0, "region": 0.16666666666666666,
                "amount": 0.3333333333333333, "coupon": 0.8333333333333334},
  "basic_stats": {
    "order_id": {"count": 6.0, "mean": 3.5, "std": 1.8708286933869707,
                 "min": 1.0, "25%": 2.25, "50%": 3.5, "75%": 4.75, "max": 6.0},
    "region": {"count": 5.0, "unique": 3.0, "top": "EU", "freq": 3.0},
    "amount": {"count": 4.0, "mean": 41.2475, "std": 12.03419867427931,
               "min": 25.5, "25%": 36.0, "50%": 42.745, "75%": 47.9925, "max": 54.0},
    "coupon": {"count": 1.0, "unique": 1.0, "top": "SPRING", "freq": 1.0}
  },
  "skewness": {"order_id": 0.0, "amount": -0.5516},
  "kurtosis": {"order_id": -1.2, "amount": 0.0271},
  "histogram": {
    "order_id": {"bins": [1.0, 2.25, 3.5, 4.75, 6.0], "counts": [2, 1, 1, 2]},
    "amount": {"bins": [25.5, 35.0, 44.5, 54.0], "counts": [1, 1, 2]}
  }
}"#;

fn main() -> Result<()> {
    let profile = Profile::from_json(RESPONSE)?;

    let summary = summarize(&profile);
    println!("=== Summary ===");
    println!("rows: {}", summary.row_count);
    println!("columns: {}", summary.column_count);
    println!("missing cells: {}", summary.total_nulls);
    println!("missing: {}", summary.null_percentage_display());

    println!("\n=== Types ===");
    for entry in type_distribution(&profile) {
        println!("{:<10} {}", entry.data_type, entry.count);
    }

    let rows = project_columns(&profile);
    println!("\n=== Columns ===");
    print!("{}", MarkdownExporter::new().render(&rows));

    println!("\n=== Histogram: amount ===");
    for bin in project_histogram(&profile, "amount").bins() {
        println!("{:>12} {}", bin.bin_label, "#".repeat(bin.count as usize));
    }

    // `region` is categorical, so there is nothing to draw
    let region = project_histogram(&profile, "region");
    println!("region histogram available: {}", region.is_available());

    println!("\n=== column_profile.csv ===");
    println!("{}", String::from_utf8_lossy(&to_csv_export(&rows)?));

    println!("\n=== profile.json ===");
    let json = JsonExporter::new().with_pretty(true).export(&rows)?;
    println!("{}", String::from_utf8_lossy(&json));

    Ok(())
}
