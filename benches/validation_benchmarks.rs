use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maps_bridge_contract::prelude::*;
use std::time::Duration;

fn conforming_response() -> ServiceResponse {
    let (lat, lon) = (37.4224, -122.0841);
    let body = json!({
        "coordinates": {"lat": lat, "lon": lon, "valid": true},
        "name": "Googleplex",
        "address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
        "links": {
            "apple": format!("https://maps.apple.com/?ll={},{}", lat, lon),
            "komoot": format!("https://www.komoot.com/plan/@{},{},15z", lat, lon),
            "bing": format!("https://www.bing.com/maps?cp={}~{}", lat, lon),
            "osm": format!("https://www.openstreetmap.org/?mlat={}&mlon={}", lat, lon),
            "waze": format!("https://waze.com/ul?ll={},{}", lat, lon),
            "google": format!("https://www.google.com/maps/search/?api=1&query={},{}", lat, lon),
        }
    });
    ServiceResponse::from_json(200, Duration::from_millis(200), &body)
}

fn benchmark_check_battery(c: &mut Criterion) {
    let record = IterationRecord::new("1600 Amphitheatre Parkway")
        .with_description("bench")
        .with_expected_coordinates(37.4224, -122.0841)
        .with_expected_name("Googleplex");
    let mut context = SharedContext::new();
    RequestBuilder::arrange(&record, &mut context).unwrap();
    let validator = ResponseValidator::default();
    let response = conforming_response();

    c.bench_function("evaluate_conforming_response", |b| {
        b.iter(|| black_box(validator.evaluate(&response, &context)))
    });

    c.bench_function("arrange_and_cleanup", |b| {
        b.iter(|| {
            let mut context = SharedContext::new();
            black_box(RequestBuilder::arrange(&record, &mut context).unwrap());
            CleanupManager::cleanup(&mut context)
        })
    });
}

criterion_group!(benches, benchmark_check_battery);
criterion_main!(benches);
