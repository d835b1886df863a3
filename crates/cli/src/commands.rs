//! Command execution: load the reference tables, then build, search or show.

use std::path::{Path, PathBuf};

use anyhow::Context;

use culookup_breakdown::{
    BuildOptions, Enricher, ListingRow, ReferenceTables, breakdown_lines, build_database, legend,
    search_listings,
};
use culookup_core::CuId;
use culookup_ingest::{discover, load_tables, write_breakdown_csv, write_mapping};

use crate::cli::{Cli, Command};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let log_config = cli.log_config();
    culookup_observability::init(&log_config).with_context(|| {
        format!(
            "failed to open log file {}",
            log_config.file.as_deref().unwrap_or(Path::new("-")).display()
        )
    })?;

    let tables = load(&cli)?;
    let options = BuildOptions {
        backup_fallback: cli.backup_fallback,
    };

    match cli.resolved_command() {
        Command::Build { output } => run_build(&tables, options, &output),
        Command::Search { query } => {
            run_search(&tables, &query);
            Ok(())
        }
        Command::Show { cu, csv } => {
            let csv = csv.map(|path| path.unwrap_or_else(|| default_report_path(&cu)));
            run_show(&tables, options, &CuId::new(cu), csv.as_deref())
        }
    }
}

fn load(cli: &Cli) -> anyhow::Result<ReferenceTables> {
    let files = discover(&cli.data_dir, &cli.patterns.to_patterns())
        .with_context(|| format!("locating input CSVs in {}", cli.data_dir.display()))?;
    load_tables(&files, &cli.columns.to_layout()).context("loading reference tables")
}

pub(crate) fn run_build(
    tables: &ReferenceTables,
    options: BuildOptions,
    output: &Path,
) -> anyhow::Result<()> {
    let mapping = build_database(tables, options).context("building CU to SC database")?;
    write_mapping(output, &mapping)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(
        output = %output.display(),
        cus = mapping.len(),
        stock_codes = mapping.leaf_count(),
        "CU to SC database saved"
    );
    println!(
        "CU to SC database saved to {} ({} CUs)",
        output.display(),
        mapping.len()
    );
    Ok(())
}

fn run_search(tables: &ReferenceTables, query: &str) {
    let hits = search_listings(&tables.listings, query);
    tracing::info!(query, hits = hits.len(), "listings searched");

    if hits.is_empty() {
        println!("No listings match {query:?}.");
        return;
    }
    println!("{}", tables.listings.headers().join("\t"));
    for row in hits {
        println!("{}", render_cells(row));
    }
}

fn run_show(
    tables: &ReferenceTables,
    options: BuildOptions,
    cu: &CuId,
    csv: Option<&Path>,
) -> anyhow::Result<()> {
    tracing::info!(cu = %cu, "showing CU details");

    let rows = legend(tables, cu);
    if rows.is_empty() {
        println!("No CU legend found in listings for {cu}.");
    } else {
        println!("CU legend:");
        println!("{}", tables.listings.headers().join("\t"));
        for row in rows {
            println!("{}", render_cells(row));
        }
    }

    let mut enricher = Enricher::new(&tables.sc_descriptions);
    if options.backup_fallback {
        enricher = enricher.with_backup(&tables.backup_descriptions);
    }
    let lines = breakdown_lines(tables, cu, &enricher)?;

    if lines.is_empty() {
        println!("No SC breakdown data found for {cu}.");
    } else {
        println!();
        println!("SC breakdown:");
        println!("CU\tCHILD CU\tSTOCK CODE\tQTY\tSC Description\tUOI\tPrice");
        for line in &lines {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                line.cu,
                line.child_cu.as_deref().unwrap_or(""),
                line.stock_code,
                line.quantity,
                line.description.as_deref().unwrap_or(""),
                line.uoi.as_deref().unwrap_or(""),
                line.price.as_deref().unwrap_or(""),
            );
        }
    }

    if let Some(path) = csv {
        write_breakdown_csv(path, &lines)
            .with_context(|| format!("exporting breakdown to {}", path.display()))?;
        tracing::info!(cu = %cu, path = %path.display(), "breakdown exported");
        println!("Breakdown written to {}", path.display());
    }
    Ok(())
}

fn default_report_path(cu: &str) -> PathBuf {
    PathBuf::from(format!("CU_{cu}_breakdown.csv"))
}

fn render_cells(row: &ListingRow) -> String {
    row.cells
        .iter()
        .map(|cell| cell.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use culookup_breakdown::{BreakdownRow, BreakdownTable, Listings, Quantity};
    use culookup_core::StockCode;

    fn tables() -> ReferenceTables {
        ReferenceTables {
            listings: Listings::new(
                vec!["CU".into(), "Description".into()],
                vec![ListingRow {
                    cu: Some(CuId::new("A1")),
                    description: Some("Widget".into()),
                    cells: vec![Some("A1".into()), Some("Widget".into())],
                }],
            ),
            breakdowns: BreakdownTable::from_rows(vec![BreakdownRow {
                cu: CuId::new("A1"),
                child_cu: None,
                stock_code: Some(StockCode::parse("9")),
                quantity: Quantity::Stated("2".into()),
            }]),
            ..ReferenceTables::default()
        }
    }

    #[test]
    fn build_writes_the_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        run_build(&tables(), BuildOptions::default(), &out).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["A1"]["SCs"][0]["Stock Code"], "9");
        assert_eq!(json["A1"]["SCs"][0]["Quantity"], "2");
    }

    #[test]
    fn show_exports_csv() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.csv");
        run_show(&tables(), BuildOptions::default(), &CuId::new("A1"), Some(&out)).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("CU,CHILD CU,STOCK CODE,QTY,SC Description,UOI,Price\n"));
        assert!(text.contains("A1,,9,2,No Description Found,,No Price Found"));
    }

    #[test]
    fn show_rejects_unknown_cu() {
        let err = run_show(&tables(), BuildOptions::default(), &CuId::new("nope"), None).unwrap_err();
        assert!(err.to_string().contains("unknown CU: nope"));
    }

    #[test]
    fn report_path_names_the_cu() {
        assert_eq!(default_report_path("A1"), PathBuf::from("CU_A1_breakdown.csv"));
    }
}
