use chrono::Duration;
use rcactus::chart::{ChartEmitter, PngEmitter};
use rcactus::core::render::RenderLogic;
use std::fs;

mod common;
use common::{date, day_rows, test_config, test_dir, write_log};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

#[test]
fn render_writes_both_png_charts() {
    let dir = test_dir("chart_png");
    let cfg = test_config(&dir);
    let today = date(2026, 3, 10);

    let mut rows = Vec::new();
    for delta in (0..9).rev() {
        let day = today - Duration::days(delta);
        rows.extend(day_rows(day, 14.0 + delta as f64, 30));
        // 9-field rows so the humidity chart has data too
        for (minute, humidity) in [(40, 40.0), (50, 43.0)] {
            rows.push(format!(
                "{} 23:{minute}:00,18.0,17.5,{:.1},2,0,5.0,10.0,1",
                day.format("%Y-%m-%d"),
                humidity + delta as f64
            ));
        }
    }
    write_log(&cfg, &rows);

    let out_dir = dir.join("charts");
    let output =
        RenderLogic::render(&cfg, today, None, Some(&PngEmitter as &dyn ChartEmitter), &out_dir)
            .unwrap();

    assert_eq!(
        output.images,
        vec![out_dir.join("temperature.png"), out_dir.join("humidity.png")]
    );
    for image in &output.images {
        let bytes = fs::read(image).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE), "{}", image.display());
    }
}

#[test]
fn empty_plan_still_renders() {
    let dir = test_dir("chart_empty");
    let cfg = test_config(&dir);
    write_log(&cfg, &["2026-03-10 08:00:00,20.0,0".to_string()]);

    let out_dir = dir.join("charts");
    let output = RenderLogic::render(
        &cfg,
        date(2026, 3, 10),
        None,
        Some(&PngEmitter as &dyn ChartEmitter),
        &out_dir,
    )
    .unwrap();

    // a single reading draws nothing, but the axes are still emitted
    assert!(output.plans.iter().all(|p| p.instructions.is_empty()));
    let bytes = fs::read(out_dir.join("humidity.png")).unwrap();
    assert!(bytes.starts_with(PNG_SIGNATURE));
}
