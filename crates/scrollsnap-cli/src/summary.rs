use std::path::{Path, PathBuf};

use console::Style;
use scrollsnap_core::align::{Motion, OverlapResult, ShiftResult};
use scrollsnap_core::session::Commit;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    good: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            warn: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_overlap(image1: &Path, image2: &Path, result: &OverlapResult, floor: f64) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Overlap"));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Upper"),
        s.path.apply_to(image1.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Lower"),
        s.path.apply_to(image2.display())
    );

    if result.is_match() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Offset Y"),
            s.value.apply_to(result.offset_y)
        );
        println!(
            "  {:<14}{}",
            s.label.apply_to("Height"),
            s.value.apply_to(result.overlap_height)
        );
        println!(
            "  {:<14}{}",
            s.label.apply_to("Confidence"),
            s.good.apply_to(format!("{:.4}", result.confidence))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Result"),
            s.warn.apply_to(format!("no overlap above similarity {:.2}", floor))
        );
    }
    println!();
}

pub fn print_shift(result: &ShiftResult, motion: Motion) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Frame Shift"));
    println!("  {:<14}{}", s.label.apply_to("dy"), s.value.apply_to(result.dy));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Confidence"),
        s.value.apply_to(format!("{:.4}", result.confidence))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mean diff"),
        s.value.apply_to(format!("{:.3}", result.mean_diff))
    );
    let verdict = match motion {
        Motion::Static => s.warn.apply_to("static".to_string()),
        Motion::Shift(dy) => s.good.apply_to(format!("scrolled {dy} rows")),
        Motion::Uncertain => s.warn.apply_to("uncertain".to_string()),
    };
    println!("  {:<14}{}", s.label.apply_to("Motion"), verdict);
    println!();
}

/// Per-decision tallies for a scanned sequence.
#[derive(Default)]
pub struct DecisionCounts {
    pub committed: usize,
    pub skipped: usize,
    pub static_frames: usize,
    pub held: usize,
    pub uncertain: usize,
}

/// One committed frame and its overlap with the previous commit.
pub struct ScanRow {
    pub path: PathBuf,
    pub commit: Commit,
    pub overlap: Option<OverlapResult>,
}

pub fn print_scan(rows: &[ScanRow], counts: &DecisionCounts) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Capture Session"));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Committed"),
        s.value.apply_to(counts.committed)
    );
    println!(
        "  {:<14}{} static, {} held, {} uncertain, {} skipped",
        s.label.apply_to("Discarded"),
        counts.static_frames,
        counts.held,
        counts.uncertain,
        counts.skipped
    );
    println!();

    println!(
        "  {:>5}  {:>6}  {:>8}  {:>8}  {:>8}  {:>7}  File",
        "Index", "dy", "Total", "Offset", "Height", "Conf"
    );
    println!("  {}", "-".repeat(64));
    for row in rows {
        let (offset, height, conf) = match row.overlap {
            Some(o) if o.is_match() => (
                o.offset_y.to_string(),
                o.overlap_height.to_string(),
                format!("{:.4}", o.confidence),
            ),
            Some(_) => ("-".into(), "none".into(), "-".into()),
            None => ("-".into(), "-".into(), "-".into()),
        };
        println!(
            "  {:>5}  {:>6}  {:>8}  {:>8}  {:>8}  {:>7}  {}",
            row.commit.index,
            row.commit.dy,
            row.commit.total_offset,
            offset,
            height,
            conf,
            s.path.apply_to(row.path.display())
        );
    }
    println!();
}
