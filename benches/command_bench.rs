// Benchmark for command parsing and pulse-width conversion
// Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use robo_arm_rs::command::parse_command;
use robo_arm_rs::hardware::pulse::{angle_to_pulse, pulse_to_angle};

fn bench_command_parser(c: &mut Criterion) {
    let lines: Vec<String> = (0..10_000)
        .map(|i| format!("SET_ALL_JOINT_ANGLES,{},{},{},{},{},{},40.0", i % 180, 10, 20, 30, 40, 50))
        .collect();
    c.bench_function("parse 10k SET_ALL_JOINT_ANGLES lines", |b| {
        b.iter(|| {
            let count = lines.iter().filter(|line| parse_command(line, 6).is_ok()).count();
            assert_eq!(count, 10_000);
        });
    });
}

fn bench_pulse_codec(c: &mut Criterion) {
    c.bench_function("angle -> pulse -> angle, 1800 angles", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1800 {
                let pulse = angle_to_pulse(black_box(i as f64 / 10.0), 180.0);
                sum += pulse_to_angle(pulse, 180.0);
            }
            sum
        });
    });
}

criterion_group!(benches, bench_command_parser, bench_pulse_codec);
criterion_main!(benches);
