//! The whole run: fetch every page, clean the records, summarise and draw.

use std::time::Instant;

use crate::{
    collect::collect_records,
    config::Config,
    fetch::PageSource,
    render::render_chart,
    table::{write_export, Aggregate, Table},
};

#[derive(Debug)]
pub struct Report {
    pub table: Table,
    pub aggregate: Aggregate,
    pub skipped: usize,
}

pub async fn run(source: &impl PageSource, config: &Config) -> crate::Result<Report> {
    let start = Instant::now();
    let collection = collect_records(source, config.pages.clone(), config.extraction).await?;
    log::trace!("Collected pages {:?} in \t {:?}", config.pages, start.elapsed());
    if collection.skipped > 0 {
        log::warn!(
            "Skipped {} restaurant cards with missing fields",
            collection.skipped
        );
    }

    let table = Table::from_records(collection.records)?;
    if table.is_empty() {
        log::warn!("No restaurants found on pages {:?}", config.pages);
    }
    log::info!(
        "{} restaurants, {} without a numeric rating",
        table.len(),
        table.missing_ratings()
    );

    let aggregate = table.average_rating_by_cuisine();
    render_chart(&aggregate, &config.output)?;
    if let Some(export) = &config.export {
        write_export(export, &table, &aggregate)?;
        log::info!("Wrote table to {}", export.display());
    }

    Ok(Report {
        table,
        aggregate,
        skipped: collection.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collect::tests::StubSource, table::CuisineRating, Error};
    use std::{fs, path::PathBuf};

    fn scratch(stem: &str, extension: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{stem}_{}.{extension}", std::process::id()))
    }

    #[tokio::test]
    async fn test_single_page_run() {
        let html =
            fs::read_to_string("./src/parse/html_examples/listing_page/restaurants.html").unwrap();
        let source = StubSource::default().with_page(1, Some(html));
        let output = scratch("pipeline_chart", "png");
        let config = Config {
            pages: 1..=1,
            output: output.clone(),
            ..Config::default()
        };

        let report = run(&source, &config).await.unwrap();

        assert!(output.exists());
        fs::remove_file(&output).unwrap();
        assert_eq!(report.table.len(), 2);
        assert_eq!(
            report.aggregate.entries(),
            [
                CuisineRating::new("Italian", Some(4.5)),
                CuisineRating::new("Indian", Some(4.0)),
            ]
        );
        assert_eq!(report.skipped, 0);
    }

    #[tokio::test]
    async fn test_malformed_rating_does_not_abort() {
        let html =
            fs::read_to_string("./src/parse/html_examples/listing_page/missing_rating.html")
                .unwrap();
        let source = StubSource::default().with_page(1, Some(html));
        let output = scratch("pipeline_lenient_chart", "png");
        let export = scratch("pipeline_lenient", "json");
        let config = Config {
            pages: 1..=2,
            output: output.clone(),
            export: Some(export.clone()),
            ..Config::default()
        };

        let report = run(&source, &config).await.unwrap();

        fs::remove_file(&output).unwrap();
        let exported = fs::read_to_string(&export).unwrap();
        fs::remove_file(&export).unwrap();
        assert!(exported.contains("Curry House"));
        assert_eq!(report.skipped, 1);
        assert_eq!(report.table.missing_ratings(), 1);
        assert_eq!(
            report.aggregate.entries(),
            [
                CuisineRating::new("Italian", Some(4.5)),
                CuisineRating::new("Indian", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_bad_delivery_time_leaves_no_chart() {
        let html = crate::collect::tests::page(&[crate::collect::tests::card(
            "Ghost Kitchen",
            "Fusion",
            "4.0",
            "closed",
        )]);
        let source = StubSource::default().with_page(1, Some(html));
        let output = scratch("pipeline_no_chart", "png");
        let config = Config {
            pages: 1..=1,
            output: output.clone(),
            ..Config::default()
        };

        let err = run(&source, &config).await.unwrap_err();

        assert!(matches!(err, Error::Clean(_)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_empty_rating_keeps_row() {
        use crate::collect::tests::{card, page};
        let html = page(&[
            card("Pizza Place", "Italian", "4.5", "30 mins"),
            card("Curry House", "Indian", "", "45 mins"),
        ]);
        let output = scratch("pipeline_empty_rating", "png");
        let config = Config {
            pages: 1..=1,
            output: output.clone(),
            extraction: crate::parse::ExtractionPolicy::Strict,
            ..Config::default()
        };

        let report = run(&StubSource::default().with_page(1, Some(html)), &config)
            .await
            .unwrap();

        fs::remove_file(&output).unwrap();
        assert_eq!(report.table.len(), 2);
        assert_eq!(report.table.rows()[1].rating, None);
        assert_eq!(
            report.aggregate.entries(),
            [
                CuisineRating::new("Italian", Some(4.5)),
                CuisineRating::new("Indian", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_cuisine_spacing_variants_stay_apart() {
        use crate::collect::tests::{card, page};
        let html = page(&[
            card("Tandoor", "North  Indian", "3.0", "40 mins"),
            card("Dhaba", "North Indian", "4.0", "35 mins"),
        ]);
        let output = scratch("pipeline_spacing", "png");
        let config = Config {
            pages: 1..=1,
            output: output.clone(),
            ..Config::default()
        };

        let report = run(&StubSource::default().with_page(1, Some(html)), &config)
            .await
            .unwrap();

        fs::remove_file(&output).unwrap();
        assert_eq!(
            report.aggregate.entries(),
            [
                CuisineRating::new("North  Indian", Some(3.0)),
                CuisineRating::new("North Indian", Some(4.0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_chart_writes_no_export() {
        let html =
            fs::read_to_string("./src/parse/html_examples/listing_page/restaurants.html").unwrap();
        let export = scratch("pipeline_unwritten", "json");
        let config = Config {
            pages: 1..=1,
            output: scratch("missing_dir", "d").join("chart.png"),
            export: Some(export.clone()),
            ..Config::default()
        };

        let err = run(&StubSource::default().with_page(1, Some(html)), &config)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Chart(_) | Error::Io(_)), "{err}");
        assert!(!export.exists());
    }
}
