//! Criterion benchmarks for u-timetable.
//!
//! Uses synthetic departments of increasing size to measure fitness
//! evaluation, operator cost and short evolution runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_timetable::ga::{GaConfig, GaProblem};
use u_timetable::models::{Catalog, ClassGroup, Course, Day, Lecturer, Room, TimeSlot};
use u_timetable::timetable::{crossover, mutate, TimetableEngine, TimetableProblem};

// ===========================================================================
// Synthetic department: `classes` classes × 5 courses, 8 lecturers
// ===========================================================================

fn department(classes: u32) -> Catalog {
    let courses = classes * 2;
    let slots = (0..6u16)
        .map(|i| {
            let start = 8 + i * 2;
            TimeSlot::new(
                u32::from(i) + 1,
                format!("{start:02}:00").parse().unwrap(),
                format!("{:02}:00", start + 2).parse().unwrap(),
            )
        })
        .collect();

    Catalog::new()
        .with_classes(
            (0..classes)
                .map(|c| {
                    ClassGroup::new(c, format!("Class {c}"), 20 + c % 20)
                        .with_courses((0..5).map(|k| (c * 3 + k) % courses).collect())
                })
                .collect(),
        )
        .with_courses(
            (0..courses)
                .map(|k| Course::new(k, format!("Course {k}")).with_lecturers(vec![k % 8]))
                .collect(),
        )
        .with_lecturers((0..8).map(|l| Lecturer::new(l, format!("Lecturer {l}"))).collect())
        .with_rooms((0..6).map(|r| Room::new(r, format!("Room {r}"), 30 + r * 5)).collect())
        .with_days(&Day::WEEKDAYS)
        .with_time_slots(slots)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    for classes in [4u32, 16, 40] {
        let problem = TimetableProblem::standard(department(classes))
            .unwrap()
            .with_cache_reset_interval(0);
        let mut rng = StdRng::seed_from_u64(42);
        let timetable = problem.create_individual(&mut rng);

        group.bench_with_input(
            BenchmarkId::new("report", problem.pairing_count()),
            &timetable,
            |b, t| b.iter(|| black_box(problem.constraint_report(black_box(t)))),
        );
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");

    for classes in [4u32, 16, 40] {
        let problem = TimetableProblem::standard(department(classes)).unwrap();
        let builder = problem.builder();
        let mut rng = StdRng::seed_from_u64(7);
        let p1 = problem.create_individual(&mut rng);
        let p2 = problem.create_individual(&mut rng);
        let n = problem.pairing_count();

        group.bench_with_input(BenchmarkId::new("seed", n), &n, |b, _| {
            b.iter(|| black_box(builder.build(&mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("crossover", n), &n, |b, _| {
            b.iter(|| black_box(crossover(&builder, &p1, &p2, &mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("mutate", n), &n, |b, _| {
            b.iter(|| {
                let mut child = p1.clone();
                mutate(&builder, &mut child, 0.1, &mut rng);
                black_box(child)
            })
        });
    }
    group.finish();
}

fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve");
    group.sample_size(10);

    for (classes, pop, gen) in [(4u32, 30usize, 30usize), (16, 50, 20), (40, 50, 10)] {
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("c{}_p{}_g{}", classes, pop, gen), classes),
            &(department(classes), config),
            |b, (catalog, config)| {
                b.iter(|| {
                    let mut engine = TimetableEngine::new(catalog.clone(), config.clone()).unwrap();
                    black_box(engine.evolve(gen).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_operators, bench_evolve);
criterion_main!(benches);
