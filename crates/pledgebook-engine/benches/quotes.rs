//! Pledgebook hot-path benchmarks: valuation and settlement quoting.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pledgebook_common::{Pledge, PledgeId, PledgeItem, ShopConfig};
use pledgebook_engine::{assess_value, propose_loan_amount, quote_full_redemption, summarize};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_pledge(seq: u32) -> Pledge {
    let item = PledgeItem {
        barcode: format!("B-{:05}", seq),
        category: "chain".to_string(),
        purity_code: "916".to_string(),
        weight_grams: dec!(18.5),
        stone_deduction_grams: None,
        assessed_value: dec!(1620),
    };
    Pledge::issue(
        PledgeId::new(2026, seq),
        format!("CUST-{:04}", seq),
        vec![item],
        dec!(1130),
        date(2026, 1, 10),
        date(2026, 2, 10),
    )
    .unwrap()
}

fn bench_valuation(c: &mut Criterion) {
    let config = ShopConfig::default();

    c.bench_function("assess_and_offer", |b| {
        b.iter(|| {
            let assessed = assess_value(
                black_box(dec!(18.5)),
                black_box("916"),
                black_box(dec!(95.50)),
                &config.purity_rates,
            )
            .unwrap();
            propose_loan_amount(assessed, dec!(0.70)).unwrap()
        });
    });
}

fn bench_quoting(c: &mut Criterion) {
    let config = ShopConfig::default();
    let pledge = sample_pledge(1);
    let today = date(2026, 3, 20);

    c.bench_function("quote_full_redemption", |b| {
        b.iter(|| quote_full_redemption(black_box(&pledge), &config, today).unwrap());
    });
}

fn bench_portfolio_summary(c: &mut Criterion) {
    let config = ShopConfig::default();
    let book: Vec<Pledge> = (1..=1000).map(sample_pledge).collect();
    let today = date(2026, 3, 20);

    c.bench_function("summarize_1k_pledges", |b| {
        b.iter(|| summarize(black_box(&book), today, &config));
    });
}

criterion_group!(
    benches,
    bench_valuation,
    bench_quoting,
    bench_portfolio_summary
);
criterion_main!(benches);
