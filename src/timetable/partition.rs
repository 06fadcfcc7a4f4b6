//! Pairing plan and session partitioning.
//!
//! A [`SchedulingPlan`] fixes, once per engine, which (class, course)
//! pairing each gene position schedules, which session it belongs to and
//! which days, slots and rooms it may legally draw from.
//!
//! In the session-aware variant, courses and classes are grouped by
//! session type first. Each pairing is scheduled under the first active
//! session (in catalog order) that both its course and its class admit.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::models::{
    ClassId, CourseId, Day, IndexedCatalog, LecturerId, RoomId, Session, SessionId, SessionTag,
    SessionType, SlotId,
};

/// The legal (day, slot, room) choices for a set of pairings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDomain {
    /// Teaching days.
    pub days: Vec<Day>,
    /// Teaching slots.
    pub slots: Vec<SlotId>,
    /// Bookable rooms.
    pub rooms: Vec<RoomId>,
}

/// One (class, course) pairing to schedule, i.e. one gene position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// Class taught.
    pub class_id: ClassId,
    /// Course taught.
    pub course_id: CourseId,
    /// Lecturers of the course.
    pub lecturer_ids: Vec<LecturerId>,
    /// Students in the class.
    pub class_size: u32,
    /// Session scheduled under, if any.
    pub session: Option<SessionTag>,
    /// Index into [`SchedulingPlan::domains`].
    pub domain: usize,
}

/// Pairings of one session, as produced by the partitioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGroup {
    /// The session; `None` collects pairings no active session admits.
    pub session: Option<SessionTag>,
    /// Gene positions scheduled under this session.
    pub pairings: Vec<usize>,
}

/// Fixed gene layout and legal domains.
#[derive(Debug, Clone)]
pub struct SchedulingPlan {
    pairings: Vec<Pairing>,
    domains: Vec<SlotDomain>,
    groups: Vec<SessionGroup>,
    courses_by_type: BTreeMap<SessionType, Vec<CourseId>>,
    classes_by_type: BTreeMap<SessionType, Vec<ClassId>>,
}

impl SchedulingPlan {
    /// Single-session plan: every pairing draws from the whole catalog.
    pub fn standard(catalog: &IndexedCatalog) -> Self {
        let mut domains = DomainTable::default();
        let mut pairings = Vec::new();

        for (class_id, course_id) in pairing_ids(catalog) {
            let domain = domains.intern(catalog, None, min_duration(catalog, course_id));
            pairings.push(pairing(catalog, class_id, course_id, None, domain));
        }

        Self {
            groups: vec![SessionGroup {
                session: None,
                pairings: (0..pairings.len()).collect(),
            }],
            pairings,
            domains: domains.domains,
            courses_by_type: BTreeMap::new(),
            classes_by_type: BTreeMap::new(),
        }
    }

    /// Session-aware plan: pairings are partitioned by session and draw
    /// from their session's legal days, slots and rooms.
    pub fn session_aware(catalog: &IndexedCatalog) -> Self {
        let records = catalog.catalog();
        let active: Vec<&Session> = records.sessions.iter().filter(|s| s.is_active).collect();

        let mut courses_by_type: BTreeMap<SessionType, Vec<CourseId>> = BTreeMap::new();
        let mut classes_by_type: BTreeMap<SessionType, Vec<ClassId>> = BTreeMap::new();
        for session in &active {
            let t = session.session_type;
            courses_by_type.entry(t).or_insert_with(|| {
                records
                    .courses
                    .iter()
                    .filter(|c| c.eligible_for(t))
                    .map(|c| c.id)
                    .collect()
            });
            classes_by_type.entry(t).or_insert_with(|| {
                records
                    .classes
                    .iter()
                    .filter(|c| c.participates_in(t))
                    .map(|c| c.id)
                    .collect()
            });
        }

        let mut domains = DomainTable::default();
        let mut pairings = Vec::new();
        let mut groups: Vec<SessionGroup> = active
            .iter()
            .map(|s| SessionGroup {
                session: Some(tag(s)),
                pairings: Vec::new(),
            })
            .collect();
        let mut unplaced = Vec::new();

        for (class_id, course_id) in pairing_ids(catalog) {
            let position = pairings.len();
            let hint = min_duration(catalog, course_id);
            let chosen = active.iter().position(|s| {
                let t = s.session_type;
                courses_by_type.get(&t).is_some_and(|ids| ids.contains(&course_id))
                    && classes_by_type.get(&t).is_some_and(|ids| ids.contains(&class_id))
            });

            match chosen {
                Some(i) => {
                    let domain = domains.intern(catalog, Some(active[i]), hint);
                    pairings.push(pairing(catalog, class_id, course_id, Some(tag(active[i])), domain));
                    groups[i].pairings.push(position);
                }
                None => {
                    warn!(
                        class_id,
                        course_id,
                        "no active session admits pairing; scheduling catalog-wide"
                    );
                    let domain = domains.intern(catalog, None, hint);
                    pairings.push(pairing(catalog, class_id, course_id, None, domain));
                    unplaced.push(position);
                }
            }
        }

        groups.retain(|g| !g.pairings.is_empty());
        if !unplaced.is_empty() {
            groups.push(SessionGroup {
                session: None,
                pairings: unplaced,
            });
        }

        Self {
            pairings,
            domains: domains.domains,
            groups,
            courses_by_type,
            classes_by_type,
        }
    }

    /// All pairings, in gene order.
    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    /// Pairing at gene position `idx`.
    pub fn pairing(&self, idx: usize) -> &Pairing {
        &self.pairings[idx]
    }

    /// Number of gene positions.
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    /// Whether there is nothing to schedule.
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Distinct legal domains referenced by pairings.
    pub fn domains(&self) -> &[SlotDomain] {
        &self.domains
    }

    /// Domain of the pairing at gene position `idx`.
    pub fn domain_of(&self, idx: usize) -> &SlotDomain {
        &self.domains[self.pairings[idx].domain]
    }

    /// Pairings grouped by the session they are scheduled under.
    pub fn groups(&self) -> &[SessionGroup] {
        &self.groups
    }

    /// Courses eligible for session type `t` (session-aware plans only).
    pub fn courses_for(&self, t: SessionType) -> &[CourseId] {
        self.courses_by_type.get(&t).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes taking part in session type `t` (session-aware plans only).
    pub fn classes_for(&self, t: SessionType) -> &[ClassId] {
        self.classes_by_type.get(&t).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Interns domains by (session, minimum slot length).
#[derive(Default)]
struct DomainTable {
    domains: Vec<SlotDomain>,
    keys: HashMap<(Option<SessionId>, Option<u16>), usize>,
}

impl DomainTable {
    fn intern(
        &mut self,
        catalog: &IndexedCatalog,
        session: Option<&Session>,
        min_duration: Option<u16>,
    ) -> usize {
        let key = (session.map(|s| s.id), min_duration);
        if let Some(&idx) = self.keys.get(&key) {
            return idx;
        }
        let domain = build_domain(catalog, session, min_duration);
        self.domains.push(domain);
        self.keys.insert(key, self.domains.len() - 1);
        self.domains.len() - 1
    }
}

/// Legal choices for `session`, falling back catalog-wide per axis when
/// filtering leaves nothing.
fn build_domain(
    catalog: &IndexedCatalog,
    session: Option<&Session>,
    min_duration: Option<u16>,
) -> SlotDomain {
    let records = catalog.catalog();

    let all_days = dedup_days(records.working_days.iter().filter(|d| d.is_active).map(|d| d.day));
    let teaching: Vec<_> = records.time_slots.iter().filter(|s| !s.is_break).collect();
    let all_rooms: Vec<RoomId> = records.rooms.iter().map(|r| r.id).collect();

    let (days, mut slots, rooms) = match session {
        Some(session) => {
            let days = dedup_days(
                records
                    .working_days
                    .iter()
                    .filter(|d| d.admits(session))
                    .map(|d| d.day),
            );
            let slots: Vec<_> = teaching.iter().copied().filter(|s| s.admits(session)).collect();
            let rooms: Vec<RoomId> = records
                .rooms
                .iter()
                .filter(|r| r.available_for(session.session_type))
                .map(|r| r.id)
                .collect();
            (
                if days.is_empty() { all_days } else { days },
                if slots.is_empty() { teaching } else { slots },
                if rooms.is_empty() { all_rooms } else { rooms },
            )
        }
        None => (all_days, teaching, all_rooms),
    };

    if let Some(minutes) = min_duration {
        let long_enough: Vec<_> = slots
            .iter()
            .copied()
            .filter(|s| s.duration_minutes() >= minutes)
            .collect();
        if !long_enough.is_empty() {
            slots = long_enough;
        }
    }

    SlotDomain {
        days,
        slots: slots.iter().map(|s| s.id).collect(),
        rooms,
    }
}

fn dedup_days(days: impl Iterator<Item = Day>) -> Vec<Day> {
    let mut out: Vec<Day> = days.collect();
    out.sort();
    out.dedup();
    out
}

fn pairing_ids(catalog: &IndexedCatalog) -> Vec<(ClassId, CourseId)> {
    catalog
        .catalog()
        .classes
        .iter()
        .flat_map(|class| class.course_ids.iter().map(move |&course| (class.id, course)))
        .collect()
}

fn min_duration(catalog: &IndexedCatalog, course_id: CourseId) -> Option<u16> {
    catalog.course(course_id).and_then(|c| c.min_duration_minutes)
}

fn pairing(
    catalog: &IndexedCatalog,
    class_id: ClassId,
    course_id: CourseId,
    session: Option<SessionTag>,
    domain: usize,
) -> Pairing {
    Pairing {
        class_id,
        course_id,
        lecturer_ids: catalog
            .course(course_id)
            .map(|c| c.lecturer_ids.clone())
            .unwrap_or_default(),
        class_size: catalog.class(class_id).map_or(0, |c| c.student_count),
        session,
        domain,
    }
}

fn tag(session: &Session) -> SessionTag {
    SessionTag {
        id: session.id,
        session_type: session.session_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, ClassGroup, Course, Room, TimeSlot, WorkingDay};

    fn t(s: &str) -> crate::models::TimeOfDay {
        s.parse().unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_classes(vec![
                ClassGroup::new(1, "Day cohort", 30).with_courses(vec![10, 11]),
                ClassGroup::new(2, "Evening cohort", 20)
                    .with_courses(vec![11])
                    .with_session_types(vec![SessionType::Evening]),
            ])
            .with_courses(vec![
                Course::new(10, "Maths"),
                Course::new(11, "Databases")
                    .with_session_types(vec![SessionType::Regular, SessionType::Evening]),
            ])
            .with_rooms(vec![
                Room::new(1, "Hall", 60),
                Room::new(2, "Night lab", 25).with_session_availability(vec![SessionType::Evening]),
            ])
            .with_sessions(vec![
                Session::new(1, SessionType::Regular),
                Session::new(2, SessionType::Evening),
            ])
            .with_time_slots(vec![
                TimeSlot::new(1, t("08:00"), t("10:00")).with_session(1),
                TimeSlot::new(2, t("10:00"), t("11:00")).with_session(1),
                TimeSlot::new(3, t("12:00"), t("13:00")).as_break(),
                TimeSlot::new(4, t("18:00"), t("20:00")).with_session(2),
            ])
            .with_working_days(vec![
                WorkingDay::new(Day::Monday).with_session(1),
                WorkingDay::new(Day::Tuesday).with_session(1),
                WorkingDay::new(Day::Wednesday).with_session(2),
            ])
    }

    #[test]
    fn test_standard_plan_uses_whole_catalog() {
        let indexed = IndexedCatalog::new(catalog(), false).unwrap();
        let plan = SchedulingPlan::standard(&indexed);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.domains().len(), 1);
        let domain = plan.domain_of(0);
        assert_eq!(domain.days, vec![Day::Monday, Day::Tuesday, Day::Wednesday]);
        assert_eq!(domain.slots, vec![1, 2, 4]);
        assert_eq!(domain.rooms, vec![1, 2]);
        assert!(plan.pairings().iter().all(|p| p.session.is_none()));
    }

    #[test]
    fn test_session_plan_partitions_pairings() {
        let indexed = IndexedCatalog::new(catalog(), true).unwrap();
        let plan = SchedulingPlan::session_aware(&indexed);

        let types: Vec<_> = plan
            .pairings()
            .iter()
            .map(|p| p.session.map(|s| s.session_type))
            .collect();
        assert_eq!(
            types,
            vec![
                Some(SessionType::Regular),
                Some(SessionType::Regular),
                Some(SessionType::Evening),
            ]
        );
        assert_eq!(plan.groups().len(), 2);
        assert_eq!(plan.groups()[1].pairings, vec![2]);

        let regular = plan.domain_of(0);
        assert_eq!(regular.days, vec![Day::Monday, Day::Tuesday]);
        assert_eq!(regular.slots, vec![1, 2]);
        assert_eq!(regular.rooms, vec![1]);

        let evening = plan.domain_of(2);
        assert_eq!(evening.days, vec![Day::Wednesday]);
        assert_eq!(evening.slots, vec![4]);
        assert_eq!(evening.rooms, vec![1, 2]);

        assert_eq!(plan.courses_for(SessionType::Evening), &[11]);
        assert_eq!(plan.classes_for(SessionType::Regular), &[1]);
        assert!(plan.courses_for(SessionType::Weekend).is_empty());
    }

    #[test]
    fn test_unadmitted_pairing_falls_back_catalog_wide() {
        let mut records = catalog();
        records.classes.push(
            ClassGroup::new(3, "Weekend cohort", 15)
                .with_courses(vec![10])
                .with_session_types(vec![SessionType::Weekend]),
        );
        let indexed = IndexedCatalog::new(records, true).unwrap();
        let plan = SchedulingPlan::session_aware(&indexed);

        let last = plan.pairings().last().unwrap();
        assert!(last.session.is_none());
        assert_eq!(plan.groups().last().unwrap().session, None);
        assert_eq!(plan.domain_of(plan.len() - 1).slots, vec![1, 2, 4]);
    }

    #[test]
    fn test_min_duration_narrows_slots() {
        let mut records = catalog();
        records.courses[0] = Course::new(10, "Maths").with_min_duration(120);
        let indexed = IndexedCatalog::new(records, false).unwrap();
        let plan = SchedulingPlan::standard(&indexed);

        assert_eq!(plan.domain_of(0).slots, vec![1, 4]);
        assert_eq!(plan.domain_of(1).slots, vec![1, 2, 4]);
    }
}
