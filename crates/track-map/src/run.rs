use crate::Settings;
use std::path::PathBuf;
use track_map_lib::{
    EncodedTrack, MapClient, Marker, MarkerStyle, Result, StaticMapRequest, encode_track,
    format_markers, read_gpx, read_waypoints,
};

/// Read the track, fetch its map and write the image
///
/// Returns the path of the written image. Every input is read and validated before the
/// request is sent, and the output file is only created once the full image arrived.
pub fn run<C: MapClient>(settings: &Settings, client: &C) -> Result<PathBuf> {
    let filter = settings.filter()?;

    let points = read_gpx(&settings.file)?;
    let track = encode_track(filter.apply(points));
    tracing::info!(
        "Encoded {} track point(s) from {}",
        track.point_count,
        settings.file.display()
    );

    let markers = collect_markers(settings, &track)?;

    let request =
        StaticMapRequest::new(settings.width, settings.height, &settings.key, track.polyline)
            .with_endpoint(settings.endpoint())
            .with_zoom(settings.zoom)
            .with_markers(format_markers(&markers));
    let url = request.transport_url()?;

    if settings.print_url {
        println!("{}", request.url());
    }

    let image = client.fetch(&url)?;

    let output = settings.output_path();
    std::fs::write(&output, &image)?;
    tracing::info!("Wrote {} bytes to {}", image.len(), output.display());

    Ok(output)
}

/// Waypoint file markers in file order, then the requested start and end markers
fn collect_markers(settings: &Settings, track: &EncodedTrack) -> Result<Vec<Marker>> {
    let mut markers: Vec<Marker> = match &settings.waypoints {
        Some(path) => read_waypoints(path)?
            .into_iter()
            .map(Marker::waypoint)
            .collect(),
        None => Vec::new(),
    };

    if settings.start_waypoint {
        markers.extend(track.first.map(|p| Marker::new(p, MarkerStyle::Start)));
    }
    if settings.end_waypoint {
        markers.extend(track.last.map(|p| Marker::new(p, MarkerStyle::End)));
    }
    if (settings.start_waypoint || settings.end_waypoint) && track.point_count == 0 {
        tracing::warn!("No track points left after filtering, start/end markers skipped");
    }

    Ok(markers)
}
