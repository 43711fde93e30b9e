use std::{cmp::Ordering, f64::consts::FRAC_1_SQRT_2, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::{
    table::{Aggregate, CuisineRating},
    Error,
};

pub const CHART_SIZE: (u32, u32) = (1200, 600);
const TITLE: &str = "Average Rating by Cuisine";
/// Gap between an x tick and the end of its label.
const LABEL_GAP: i32 = 6;

/// Best rated first. The sort is stable, and cuisines without a mean go last.
pub fn rank(aggregate: &Aggregate) -> Vec<CuisineRating> {
    let mut ranked = aggregate.entries().to_vec();
    ranked.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}

/// Draws one bar per cuisine, in ranked order, and writes the png to `path`.
pub fn render_chart(aggregate: &Aggregate, path: &Path) -> crate::Result<()> {
    let ranked = rank(aggregate);
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    draw(&root, &ranked).map_err(|e| Error::Chart(format!("{}: {e}", path.display())))?;
    log::info!("Saved chart of {} cuisines to {}", ranked.len(), path.display());
    Ok(())
}

fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    ranked: &[CuisineRating],
) -> Result<(), Box<dyn std::error::Error>> {
    root.fill(&WHITE)?;

    let top = ranked
        .iter()
        .filter_map(|entry| entry.rating)
        .fold(0.0f64, f64::max);
    let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };
    // an empty segmented axis cannot be laid out
    let slots = ranked.len().max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|_: &SegmentValue<usize>| String::new())
        .x_desc("Cuisine")
        .y_desc("Average Rating")
        .draw()?;

    // plotters only turns text by right angles, so labels are laid out a glyph at a time
    let label_style = TextStyle::from(("sans-serif", 14).into_font());
    for (i, entry) in ranked.iter().enumerate() {
        let tick = chart.backend_coord(&(SegmentValue::CenterOf(i), 0.0));
        let glyphs: Vec<char> = entry.cuisine.chars().collect();
        let widths = glyphs
            .iter()
            .map(|glyph| {
                root.estimate_text_size(&glyph.to_string(), &label_style)
                    .map(|(width, _)| width)
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (glyph, at) in glyphs.iter().zip(diagonal_glyph_positions(tick, &widths)) {
            if !glyph.is_whitespace() {
                root.draw(&Text::new(glyph.to_string(), at, label_style.clone()))?;
            }
        }
    }

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.8).filled())
            .margin(8)
            .data(
                ranked
                    .iter()
                    .enumerate()
                    .filter_map(|(i, entry)| entry.rating.map(|rating| (i, rating))),
            ),
    )?;

    root.present()?;
    Ok(())
}

/// Top-left corners for glyphs of the given widths so that the text climbs at 45 degrees
/// and ends just below and left of `tick`.
fn diagonal_glyph_positions(tick: (i32, i32), widths: &[u32]) -> Vec<(i32, i32)> {
    let mut cursor = (f64::from(tick.0), f64::from(tick.1 + LABEL_GAP));
    let mut positions: Vec<(i32, i32)> = widths
        .iter()
        .rev()
        .map(|&width| {
            // spaces can measure as zero wide
            let step = f64::from(width.max(4)) * FRAC_1_SQRT_2;
            cursor = (cursor.0 - step, cursor.1 + step);
            (cursor.0.round() as i32, cursor.1.round() as i32)
        })
        .collect();
    positions.reverse();
    positions
}
