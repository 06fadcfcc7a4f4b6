//! Shared catalog fixtures for integration tests.

#![allow(dead_code)]

use u_timetable::ga::GaConfig;
use u_timetable::models::{
    Catalog, ClassGroup, Course, Day, Lecturer, Room, Session, SessionType, SlotPeriod, TimeSlot,
    WorkingDay,
};

pub fn slot(id: u32, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(id, start.parse().unwrap(), end.parse().unwrap())
}

pub fn three_slots() -> Vec<TimeSlot> {
    vec![
        slot(1, "08:00", "10:00"),
        slot(2, "10:00", "12:00"),
        slot(3, "13:00", "15:00"),
    ]
}

/// Two classes of 25, one course each, one 30-seat room, five days,
/// three slots and no lecturers.
pub fn two_class_catalog() -> Catalog {
    Catalog::new()
        .with_classes(vec![
            ClassGroup::new(1, "CS-1", 25).with_courses(vec![10]),
            ClassGroup::new(2, "CS-2", 25).with_courses(vec![11]),
        ])
        .with_courses(vec![Course::new(10, "Algorithms"), Course::new(11, "Networks")])
        .with_rooms(vec![Room::new(1, "A101", 30)])
        .with_days(&Day::WEEKDAYS)
        .with_time_slots(three_slots())
}

/// Two classes whose courses share one lecturer, with a single day and a
/// single slot: a lecturer clash cannot be avoided.
pub fn forced_clash_catalog() -> Catalog {
    Catalog::new()
        .with_classes(vec![
            ClassGroup::new(1, "CS-1", 25).with_courses(vec![10]),
            ClassGroup::new(2, "CS-2", 25).with_courses(vec![11]),
        ])
        .with_courses(vec![
            Course::new(10, "Algorithms").with_lecturers(vec![1]),
            Course::new(11, "Networks").with_lecturers(vec![1]),
        ])
        .with_lecturers(vec![Lecturer::new(1, "Dr. Mensah")])
        .with_rooms(vec![Room::new(1, "A101", 30), Room::new(2, "A102", 30)])
        .with_days(&[Day::Monday])
        .with_time_slots(vec![slot(1, "08:00", "10:00")])
}

/// A mid-sized department: four classes, six courses, three lecturers.
pub fn department_catalog() -> Catalog {
    Catalog::new()
        .with_classes(vec![
            ClassGroup::new(1, "CS-1", 40).with_courses(vec![10, 11, 12]),
            ClassGroup::new(2, "CS-2", 35).with_courses(vec![10, 13]),
            ClassGroup::new(3, "EE-1", 30).with_courses(vec![14, 15, 11]),
            ClassGroup::new(4, "EE-2", 28).with_courses(vec![14, 12]),
        ])
        .with_courses(vec![
            Course::new(10, "Algorithms").with_lecturers(vec![1]),
            Course::new(11, "Discrete Maths").with_lecturers(vec![2]),
            Course::new(12, "Databases")
                .with_lecturers(vec![3])
                .with_required_room_type("lab"),
            Course::new(13, "Compilers")
                .with_lecturers(vec![1])
                .with_preferred_periods(vec![SlotPeriod::Morning]),
            Course::new(14, "Circuits").with_lecturers(vec![2, 3]),
            Course::new(15, "Signals")
                .with_lecturers(vec![2])
                .with_preferred_room_types(vec!["lecture".into()]),
        ])
        .with_lecturers(vec![
            Lecturer::new(1, "Dr. Mensah"),
            Lecturer::new(2, "Dr. Ivanova"),
            Lecturer::new(3, "Dr. Haddad"),
        ])
        .with_rooms(vec![
            Room::new(1, "Hall A", 60).with_type("lecture"),
            Room::new(2, "Hall B", 45).with_type("lecture"),
            Room::new(3, "Lab 1", 40).with_type("lab"),
        ])
        .with_days(&Day::WEEKDAYS)
        .with_time_slots(vec![
            slot(1, "08:00", "10:00"),
            slot(2, "10:00", "12:00"),
            slot(3, "12:00", "13:00").as_break(),
            slot(4, "13:00", "15:00"),
            slot(5, "15:00", "17:00"),
        ])
}

/// Regular daytime and evening sessions with their own slots and days.
pub fn session_catalog() -> Catalog {
    Catalog::new()
        .with_classes(vec![
            ClassGroup::new(1, "Day cohort", 30).with_courses(vec![10, 11]),
            ClassGroup::new(2, "Evening cohort", 20)
                .with_courses(vec![11, 12])
                .with_session_types(vec![SessionType::Evening]),
        ])
        .with_courses(vec![
            Course::new(10, "Algorithms").with_lecturers(vec![1]),
            Course::new(11, "Databases")
                .with_lecturers(vec![2])
                .with_session_types(vec![SessionType::Regular, SessionType::Evening]),
            Course::new(12, "Networks")
                .with_lecturers(vec![2])
                .with_session_types(vec![SessionType::Evening]),
        ])
        .with_lecturers(vec![Lecturer::new(1, "Dr. Mensah"), Lecturer::new(2, "Dr. Ivanova")])
        .with_rooms(vec![
            Room::new(1, "Hall A", 60),
            Room::new(2, "Night lab", 25).with_session_availability(vec![SessionType::Evening]),
        ])
        .with_sessions(vec![
            Session::new(1, SessionType::Regular),
            Session::new(2, SessionType::Evening)
                .with_preferred_periods(vec![SlotPeriod::Evening]),
        ])
        .with_working_days(vec![
            WorkingDay::new(Day::Monday),
            WorkingDay::new(Day::Tuesday),
            WorkingDay::new(Day::Wednesday),
            WorkingDay::new(Day::Thursday).with_session(2),
        ])
        .with_time_slots(vec![
            slot(1, "08:00", "10:00").with_session(1),
            slot(2, "10:00", "12:00").with_session(1),
            slot(3, "12:00", "13:00").as_break(),
            slot(4, "18:00", "20:00").with_session(2),
            slot(5, "20:00", "21:30").with_session(2),
        ])
}

pub fn small_config(population: usize, seed: u64) -> GaConfig {
    GaConfig::default()
        .with_population_size(population)
        .with_seed(seed)
        .with_parallel(false)
}
