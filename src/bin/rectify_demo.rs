use perspector::config::load_config;
use perspector::image::io::{load_rgba_image, save_rgba_image, write_json_file};
use perspector::{classify, process, sink_dimensions, AnchorSet};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let source = load_rgba_image(&config.input_path)?;

    let mut anchors = AnchorSet::new();
    for p in &config.anchors {
        if !anchors.push(*p) {
            return Err(format!(
                "Anchor ({}, {}) is a duplicate or exceeds the limit of {}",
                p.x,
                p.y,
                AnchorSet::CAPACITY
            ));
        }
    }

    let (sink_w, sink_h) = match config.ratio {
        Some(r) => sink_dimensions(&anchors, r.width, r.height).map_err(|e| e.to_string())?,
        None => bounding_box(&anchors),
    };

    if let Some(report_path) = &config.report_path {
        let corners = classify(&anchors).map_err(|e| e.to_string())?;
        write_json_file(report_path, &corners)?;
    }

    let sink = process(source.as_view(), &anchors, sink_w, sink_h).map_err(|e| e.to_string())?;
    save_rgba_image(&sink, &config.output_path)?;
    println!(
        "Rectified {} -> {} ({}x{})",
        config.input_path.display(),
        config.output_path.display(),
        sink_w,
        sink_h
    );
    Ok(())
}

/// Extent of the anchors' bounding box, the default destination size when no
/// ratio is requested.
fn bounding_box(anchors: &AnchorSet) -> (usize, usize) {
    let mut w = 0;
    let mut h = 0;
    for a in anchors.as_slice() {
        for b in anchors.as_slice() {
            w = w.max((a.x - b.x).unsigned_abs() as usize);
            h = h.max((a.y - b.y).unsigned_abs() as usize);
        }
    }
    (w, h)
}

fn usage() -> String {
    "Usage: rectify_demo <config.json>".to_string()
}
