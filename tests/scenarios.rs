//! End-to-end timetabling scenarios.

mod common;

use common::*;
use u_timetable::constraints::ConstraintKind;
use u_timetable::ga::{Evolution, EvolutionState, GaConfig, GaRunner, GenerationProgress};
use u_timetable::models::{Assignment, ClassGroup, Day, Room, Timetable};
use u_timetable::timetable::{TimetableEngine, TimetableProblem};
use u_timetable::TimetableError;

#[test]
fn two_classes_get_a_clean_timetable() {
    let mut engine = TimetableEngine::new(two_class_catalog(), small_config(10, 1)).unwrap();
    let result = engine.evolve(20).unwrap();

    assert_eq!(result.best.len(), 2);
    let report = engine.constraint_report(&result.best);
    assert_eq!(report.count(ConstraintKind::ClassConflict), 0);
    assert_eq!(report.count(ConstraintKind::RoomConflict), 0);
    assert_eq!(report.count(ConstraintKind::LecturerConflict), 0);
    assert_eq!(result.best_fitness, 1.0);
}

#[test]
fn forced_lecturer_clash_is_reported() {
    let mut engine = TimetableEngine::new(forced_clash_catalog(), small_config(10, 2)).unwrap();
    let result = engine.evolve(20).unwrap();

    assert_eq!(result.best.len(), 2);
    assert!(result.best_fitness < 1.0);
    let report = engine.constraint_report(&result.best);
    assert_eq!(report.count(ConstraintKind::LecturerConflict), 1);
    assert!(!report.is_feasible());
    assert!(result.best_fitness <= 1.0 / 1001.0);
}

#[test]
fn elites_survive_unchanged() {
    let problem = TimetableProblem::standard(department_catalog()).unwrap();
    let config = small_config(20, 3).with_elite_ratio(0.2);
    let mut evolution = Evolution::seed(&problem, &config).unwrap();

    for _ in 0..5 {
        evolution.evaluate();
        assert_eq!(evolution.state(), EvolutionState::Evaluated);
        let elites: Vec<Timetable> = evolution.population()[..config.elite_count()].to_vec();

        evolution.reproduce();
        assert_eq!(evolution.state(), EvolutionState::Reproduced);
        assert_eq!(&evolution.population()[..elites.len()], elites.as_slice());
    }
}

#[test]
fn best_ever_never_regresses() {
    let problem = TimetableProblem::standard(department_catalog()).unwrap();
    let config = small_config(16, 4).with_max_generations(25);
    let mut seen: Vec<GenerationProgress> = Vec::new();
    let mut observer = |p: &GenerationProgress| seen.push(*p);

    let result = GaRunner::run_with_observer(&problem, &config, Some(&mut observer)).unwrap();

    assert_eq!(seen.len(), 25);
    assert!(result
        .fitness_history
        .windows(2)
        .all(|w| w[1] >= w[0]));
    let observed_max = seen.iter().map(|p| p.best_fitness).fold(0.0, f64::max);
    assert!(result.best_fitness >= observed_max);
    assert_eq!(problem.fitness(&result.best), result.best_fitness);
}

#[test]
fn single_class_clash_costs_exactly_one_thousand() {
    let catalog = two_class_catalog()
        .with_classes(vec![ClassGroup::new(1, "CS-1", 25).with_courses(vec![10, 11])])
        .with_rooms(vec![Room::new(1, "A101", 30), Room::new(2, "A102", 30)]);
    let engine = TimetableEngine::new(catalog, small_config(10, 5)).unwrap();

    let gene = |course_id, room_id| Assignment {
        class_id: 1,
        course_id,
        lecturer_ids: vec![],
        room_id,
        day: Day::Tuesday,
        slot_id: 2,
        room_capacity: 30,
        class_size: 25,
        session: None,
    };

    let class_only = Timetable::new(vec![gene(10, 1), gene(11, 2)]);
    let report = engine.constraint_report(&class_only);
    assert_eq!(report.count(ConstraintKind::ClassConflict), 1);
    assert_eq!(report.total_penalty(), 1000);
    assert_eq!(engine.fitness(&class_only), 1.0 / 1001.0);

    let class_and_room = Timetable::new(vec![gene(10, 1), gene(11, 1)]);
    assert_eq!(engine.constraint_report(&class_and_room).total_penalty(), 2000);
}

#[test]
fn evaluation_is_deterministic() {
    let problem = TimetableProblem::standard(department_catalog()).unwrap();
    let engine = TimetableEngine::new(department_catalog(), small_config(10, 6)).unwrap();
    let mut evolution = Evolution::seed(&problem, &small_config(10, 6)).unwrap();
    evolution.evaluate();

    for timetable in evolution.population() {
        let first = problem.fitness(timetable);
        assert_eq!(problem.fitness(timetable), first);
        assert_eq!(engine.fitness(timetable), first);
        assert_eq!(timetable.fitness, first);
    }
}

#[test]
fn same_seed_same_result() {
    let run = || {
        let mut engine = TimetableEngine::new(department_catalog(), small_config(12, 7)).unwrap();
        engine.evolve(10).unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.best.genes, b.best.genes);
    assert_eq!(a.fitness_history, b.fitness_history);
}

#[test]
fn department_reaches_feasibility() {
    let config = GaConfig::balanced().with_seed(8).with_parallel(false);
    let mut engine = TimetableEngine::new(department_catalog(), config).unwrap();
    let result = engine.evolve(60).unwrap();

    assert_eq!(result.best.len(), 10);
    let report = engine.constraint_report(&result.best);
    assert!(report.is_feasible(), "{report:?}");

    let rows = engine.render(&result.best);
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r.slot_id != 3), "break slot used");
    assert!(rows
        .iter()
        .all(|r| r.start_time.len() == 5 && r.end_time.len() == 5));
}

#[test]
fn session_aware_keeps_sessions_apart() {
    let mut engine =
        TimetableEngine::session_aware(session_catalog(), small_config(16, 9)).unwrap();
    let result = engine.evolve(40).unwrap();

    let report = engine.constraint_report(&result.best);
    assert!(report.is_feasible(), "{report:?}");
    assert_eq!(report.count(ConstraintKind::CrossSessionConflict), 0);

    for row in engine.render(&result.best) {
        let session = row.session_id.expect("every pairing has a session");
        if row.class_id == 2 {
            assert_eq!(session, 2);
            assert!([4, 5].contains(&row.slot_id));
        } else {
            assert_eq!(session, 1);
            assert!([1, 2].contains(&row.slot_id));
            assert_ne!(row.day, Day::Thursday);
            assert_eq!(row.room_id, 1);
        }
    }
}

#[test]
fn time_budget_stops_evolution() {
    let config = small_config(10, 10).with_time_limit_ms(1);
    let mut engine = TimetableEngine::new(department_catalog(), config).unwrap();
    let result = engine.evolve(100_000).unwrap();

    assert!(result.timed_out);
    assert!(result.generations < 100_000);
    assert_eq!(result.best.len(), 10);
}

#[test]
fn invalid_catalogs_are_rejected() {
    let no_rooms = two_class_catalog().with_rooms(vec![]);
    assert!(matches!(
        TimetableEngine::new(no_rooms, small_config(10, 0)),
        Err(TimetableError::EmptyCatalog("rooms"))
    ));

    let dangling = two_class_catalog().with_classes(vec![
        ClassGroup::new(1, "CS-1", 25).with_courses(vec![99]),
    ]);
    assert!(matches!(
        TimetableEngine::new(dangling, small_config(10, 0)),
        Err(TimetableError::UnknownReference { kind: "course", id: 99, .. })
    ));

    assert!(matches!(
        TimetableEngine::session_aware(two_class_catalog(), small_config(10, 0)),
        Err(TimetableError::EmptyCatalog("active sessions"))
    ));
}
