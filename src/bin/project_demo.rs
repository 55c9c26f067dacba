use barrel_reco::config::project_demo::{self, write_json_file};
use barrel_reco::diagnostics::ProjectionSummary;
use barrel_reco::ClusterRadialProjector;
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "project_demo".to_string());
    let config = project_demo::parse_cli(&program)?;

    let hits = project_demo::load_hits(&config.hits_path)?;

    let mut projector = ClusterRadialProjector::new(config.radius_table.build());
    projector.set_verbosity(config.verbosity);

    let mut summary = ProjectionSummary::default();
    for track in &hits.tracks {
        let (_, diag) = projector.project_with_diagnostics(track);
        summary.absorb(&diag);
    }

    println!(
        "{} tracks ({} passed through), {} hits: {} moved, {} dropped, {:.3} ms",
        summary.tracks,
        summary.tracks_passed_through,
        summary.hits_total,
        summary.moved,
        summary.dropped,
        summary.elapsed_ms
    );

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &summary)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}
