use clima::{normalize_forecast, ForecastSeries};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

fn forecast_body(count: i64) -> Value {
    let list: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "dt": 1_743_508_800 + i * 10_800,
                "main": { "temp": 12.0 + (i % 8) as f64, "feels_like": 11.2, "humidity": 60 },
                "weather": [{ "description": "nubes dispersas" }],
                "wind": { "speed": 4.2 }
            })
        })
        .collect();
    json!({ "cod": "200", "cnt": count, "list": list })
}

fn bench_normalize(c: &mut Criterion) {
    let body = forecast_body(40);
    c.bench_function("normalize_forecast", |b| {
        b.iter(|| normalize_forecast(black_box(&body)))
    });

    let series: ForecastSeries = normalize_forecast(&body).expect("bench fixture is valid");
    c.bench_function("forecast_to_csv", |b| b.iter(|| black_box(&series).to_csv()));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
