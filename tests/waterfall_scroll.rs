use fish_finder_wasm::domain::config::FinderConfig;
use fish_finder_wasm::domain::sonar::{PixelBuffer, Rgba, SonarColor, SonarRenderer};
use rand_chacha::ChaCha8Rng;

const WIDTH: usize = 300;
const HEIGHT: usize = 180;

fn visible_sonar(seed: u64) -> SonarRenderer<ChaCha8Rng> {
    let mut sonar = SonarRenderer::seeded(&FinderConfig::default(), seed);
    sonar.toggle_visibility(true);
    sonar
}

fn pings(sonar: &mut SonarRenderer<ChaCha8Rng>, count: usize) {
    let start = sonar.state().last_ping_ms;
    for i in 1..=count {
        sonar.draw_ping(start + i as f64 * 125.0);
    }
}

fn count_color(buffer: &PixelBuffer, color: SonarColor) -> usize {
    let rgba = color.rgba();
    (0..WIDTH)
        .flat_map(|x| buffer.column(x))
        .filter(|px| *px == rgba)
        .count()
}

#[test]
fn columns_scroll_two_pixels_per_ping() {
    let mut sonar = visible_sonar(21);
    sonar.apply_telemetry(false, None, None);
    pings(&mut sonar, 1);
    let painted = sonar.buffer().column(WIDTH - 2);

    pings(&mut sonar, 1);
    assert_eq!(sonar.buffer().column(WIDTH - 4), painted);

    pings(&mut sonar, 3);
    assert_eq!(sonar.buffer().column(WIDTH - 10), painted);
}

#[test]
fn unknown_depth_draws_seabed_at_eighty_percent_of_range() {
    let mut sonar = visible_sonar(21);
    pings(&mut sonar, 1);

    // 0.8 * 40 ft of a 40 ft range -> y = 140
    let column = sonar.buffer().column(WIDTH - 2);
    assert_eq!(column[139], SonarColor::BottomCore.rgba());
    assert_eq!(column[141], SonarColor::BottomCore.rgba());
    assert_eq!(column[142], SonarColor::BottomDense.rgba());
    assert_eq!(column[146], SonarColor::BottomBase.rgba());
    assert_eq!(column[HEIGHT - 1], SonarColor::BottomBase.rgba());
    assert!(column[..139].iter().all(|px| *px == SonarColor::Background.rgba()));
}

#[test]
fn noise_stays_in_the_water_column() {
    let mut sonar = visible_sonar(8);
    sonar.apply_telemetry(false, None, None);

    let allowed = [
        SonarColor::Background.rgba(),
        SonarColor::NoiseCyan.rgba(),
        SonarColor::NoiseWhite.rgba(),
    ];
    let mut speckles = 0;
    for _ in 0..50 {
        pings(&mut sonar, 1);
        let edge = sonar.buffer().column(WIDTH - 1);
        assert!(edge[..139].iter().all(|px| allowed.contains(px)));
        assert!(edge[131..139].iter().all(|px| *px == SonarColor::Background.rgba()));
        let fresh = edge[..139].iter().filter(|px| **px != SonarColor::Background.rgba()).count();
        assert!(fresh <= 12);
        speckles += fresh;
    }
    assert!(speckles > 0);
}

#[test]
fn fish_marks_need_a_known_depth() {
    let mut sonar = visible_sonar(13);
    sonar.apply_telemetry(true, None, Some(3.0));
    pings(&mut sonar, 200);
    assert_eq!(count_color(sonar.buffer(), SonarColor::FishInner), 0);
    assert_eq!(count_color(sonar.buffer(), SonarColor::FishOuter), 0);
}

#[test]
fn fish_marks_appear_above_the_seabed() {
    let mut sonar = visible_sonar(13);
    sonar.apply_telemetry(true, Some(30.0), Some(3.0));
    pings(&mut sonar, 100);

    assert!(count_color(sonar.buffer(), SonarColor::FishInner) > 0);
    assert!(count_color(sonar.buffer(), SonarColor::FishOuter) > 0);

    // seabed core sits at y = 131.25; fish live between 0.3 and 0.8 of the depth
    let inner = SonarColor::FishInner.rgba();
    for x in 0..WIDTH {
        let column = sonar.buffer().column(x);
        assert!(column[120..].iter().all(|px| *px != inner));
    }
}

#[test]
fn same_seed_same_picture() {
    let mut a = visible_sonar(99);
    let mut b = visible_sonar(99);
    for sonar in [&mut a, &mut b] {
        sonar.apply_telemetry(true, Some(27.0), Some(1.0));
        pings(sonar, 60);
    }
    assert_eq!(a.buffer(), b.buffer());

    let mut c = visible_sonar(100);
    c.apply_telemetry(true, Some(27.0), Some(1.0));
    pings(&mut c, 60);
    assert_ne!(a.buffer(), c.buffer());
}

fn is_noise(px: &Rgba) -> bool {
    *px == SonarColor::NoiseCyan.rgba() || *px == SonarColor::NoiseWhite.rgba()
}

/// Rows `[start, end)` painted with `color`; the band must be contiguous.
fn band(column: &[Rgba], color: SonarColor) -> Option<(usize, usize)> {
    let rgba = color.rgba();
    let start = column.iter().position(|px| *px == rgba)?;
    let end = column.iter().rposition(|px| *px == rgba)? + 1;
    assert!(column[start..end].iter().all(|px| *px == rgba), "gap in {:?} band", color);
    Some((start, end))
}

#[test]
fn no_noise_when_the_seabed_hugs_the_surface() {
    let mut sonar = visible_sonar(5);
    // range shrinks to 35; bottom_y = 1 / 35 * 175 = 5, nothing left above the clearance
    sonar.apply_telemetry(true, Some(1.0), None);

    for _ in 0..400 {
        pings(&mut sonar, 1);
        let edge = sonar.buffer().column(WIDTH - 1);
        assert!(!edge.iter().any(is_noise));
    }
}

#[test]
fn noise_stays_below_a_fractional_ceiling() {
    let mut sonar = visible_sonar(5);
    // bottom_y = 18 / 40 * 175 = 78.75, ceiling 68.75: row 68 is the last one allowed
    sonar.apply_telemetry(true, Some(18.0), None);
    assert_eq!(sonar.state().max_depth_range.feet(), 40.0);

    let mut deepest = 0;
    for _ in 0..400 {
        pings(&mut sonar, 1);
        let edge = sonar.buffer().column(WIDTH - 1);
        assert!(!edge[69..].iter().any(is_noise));
        if let Some(row) = edge.iter().rposition(is_noise) {
            deepest = deepest.max(row);
        }
    }
    assert!(deepest > 60);
}

#[test]
fn fish_mark_geometry() {
    let mut sonar = visible_sonar(13);
    sonar.apply_telemetry(true, Some(30.0), Some(3.0));

    let mut quiet_pings = 0;
    let mut checked = 0;
    for _ in 0..400 {
        pings(&mut sonar, 1);
        let buffer = sonar.buffer();
        let Some((inner_top, inner_bottom)) = band(&buffer.column(WIDTH - 1), SonarColor::FishInner) else {
            quiet_pings += 1;
            continue;
        };
        // older marks have scrolled out of columns w-6.. after two quiet pings
        if quiet_pings < 2 {
            quiet_pings = 0;
            continue;
        }
        quiet_pings = 0;
        checked += 1;

        // inner band: columns w-2..w, 2px shorter than a 5..11px mark
        assert!((3..=9).contains(&(inner_bottom - inner_top)));
        assert_eq!(band(&buffer.column(WIDTH - 2), SonarColor::FishInner), Some((inner_top, inner_bottom)));

        // outer band: columns w-5..w-2, 1px taller on both ends
        for x in WIDTH - 5..WIDTH - 2 {
            let column = buffer.column(x);
            assert_eq!(band(&column, SonarColor::FishOuter), Some((inner_top - 1, inner_bottom + 1)));
            assert!(column.iter().all(|px| *px != SonarColor::FishInner.rgba()));
        }
        let outside = buffer.column(WIDTH - 6);
        assert!(outside.iter().all(|px| *px != SonarColor::FishOuter.rgba()));
        assert!(outside.iter().all(|px| *px != SonarColor::FishInner.rgba()));
        for x in [WIDTH - 2, WIDTH - 1] {
            assert!(buffer.column(x).iter().all(|px| *px != SonarColor::FishOuter.rgba()));
        }

        // depth 30 of 40 ft: marks sit between 0.3 and 0.8 of it, above the seabed at 131.25
        assert!(inner_top >= 38);
        assert!(inner_bottom + 1 < 130);
    }
    assert!(checked >= 3);
}
