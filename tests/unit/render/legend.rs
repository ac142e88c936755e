use super::*;

use crate::render::colormap::ColormapKind;

#[test]
fn bar_samples_table_top_down() {
    let cmap = ColormapKind::Turbo.colormap();
    let range = GlobalRange::new(2.0, 8.0).unwrap();
    let legend = render_legend(cmap, &range, &LegendSpec::default()).unwrap();

    // Left column is never covered by tick notches.
    let top = legend.image.pixel(0, 0);
    let bottom = legend.image.pixel(0, legend.image.height - 1);
    assert_eq!([top.r, top.g, top.b], cmap.sample(1.0));
    assert_eq!([bottom.r, bottom.g, bottom.b], cmap.sample(0.0));
    assert_eq!(top.a, 255);
}

#[test]
fn default_spec_yields_seven_two_decimal_ticks() {
    let cmap = ColormapKind::Turbo.colormap();
    let range = GlobalRange::new(2.0, 8.0).unwrap();
    let legend = render_legend(cmap, &range, &LegendSpec::default()).unwrap();

    assert_eq!(legend.ticks.len(), 7);
    assert_eq!(legend.ticks[0].label, "2.00");
    assert_eq!(legend.ticks[6].label, "8.00");
    assert_eq!(legend.ticks[6].offset_y, 0);
    assert_eq!(legend.ticks[0].offset_y, legend.image.height - 1);

    // Ticks run min to max, so pixel offsets decrease monotonically.
    for pair in legend.ticks.windows(2) {
        assert!(pair[0].offset_y > pair[1].offset_y);
        assert!(pair[0].value < pair[1].value);
    }
}

#[test]
fn degenerate_range_collapses_to_one_tick() {
    let cmap = ColormapKind::Viridis.colormap();
    let range = GlobalRange::new(4.2, 4.2).unwrap();
    let legend = render_legend(cmap, &range, &LegendSpec::default()).unwrap();
    assert_eq!(legend.ticks.len(), 1);
    assert_eq!(legend.ticks[0].label, "4.20");
}

#[test]
fn undersized_spec_is_rejected() {
    let cmap = ColormapKind::Turbo.colormap();
    let range = GlobalRange::new(0.0, 1.0).unwrap();
    assert!(
        render_legend(
            cmap,
            &range,
            &LegendSpec {
                width: 0,
                height: 256,
                ticks: 7
            }
        )
        .is_err()
    );
    assert!(
        render_legend(
            cmap,
            &range,
            &LegendSpec {
                width: 8,
                height: 256,
                ticks: 1
            }
        )
        .is_err()
    );
}
