//! Turns raw input records into students, a catalog and resolved manual placements
//!
//! All fatal checks live here so a bad input aborts before anyone is placed.

use super::Notice;
use crate::core::error::SetupError;
use crate::core::models::{student::full_name, Catalog, Course, Interest, Preference, Student};
use crate::core::records::{CourseRecord, EngineInput, ManualAssignment, PreferenceSheet, StudentRecord};
use crate::{debug, info};
use rand::Rng;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Validated state ready for the assignment stages
#[derive(Debug)]
pub(super) struct Ingested {
    pub students: Vec<Student>,
    pub catalog: Catalog,
    /// `(course index, student index)` pairs in input order
    pub manual: Vec<(usize, usize)>,
    pub notices: Vec<Notice>,
}

pub(super) fn ingest<R: Rng + ?Sized>(
    input: EngineInput,
    session: u32,
    rng: &mut R,
) -> Result<Ingested, SetupError> {
    let EngineInput {
        preferences,
        students,
        courses,
        manual_assignments,
        skip_list,
    } = input;

    let known_areas: BTreeSet<String> = preferences.areas.iter().cloned().collect();
    let catalog = build_catalog(session, courses, &known_areas)?;
    info!(
        "Catalog for session {session}: {} classes across {} interest areas",
        catalog.len(),
        known_areas.len()
    );

    let skip: HashSet<String> = skip_list
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    let mut sign_ups = SignUpIndex::new(preferences, &skip);

    let mut notices = Vec::new();
    let mut built = Vec::with_capacity(students.len());
    let mut seen = HashSet::new();
    for record in students {
        let student = build_student(record, &mut sign_ups, &skip, &mut seen, &mut notices, rng)?;
        built.push(student);
    }

    let leftovers = sign_ups.leftovers();
    if !leftovers.is_empty() {
        return Err(SetupError::UnmatchedSignUps(leftovers));
    }

    let manual = resolve_manual(&manual_assignments, &catalog, &built)?;

    Ok(Ingested {
        students: built,
        catalog,
        manual,
        notices,
    })
}

fn build_catalog(
    session: u32,
    records: Vec<CourseRecord>,
    known_areas: &BTreeSet<String>,
) -> Result<Catalog, SetupError> {
    let courses = records
        .into_iter()
        .filter(|record| record.session == session)
        .map(|record| {
            Course::new(
                record.id,
                record.name,
                record.session,
                record.interest_area,
                record.grade_min,
                record.grade_max,
                i32::try_from(record.student_capacity_max).unwrap_or(i32::MAX),
            )
            .with_locations(record.location, record.meet_location)
        })
        .collect();
    Catalog::new(session, courses, known_areas)
}

/// Sign-up answers keyed by full name, with skip-listed names already removed
struct SignUpIndex {
    areas: Vec<String>,
    answers: HashMap<String, HashMap<String, String>>,
    /// First-seen order of names, for stable error messages
    order: Vec<String>,
}

impl SignUpIndex {
    fn new(sheet: PreferenceSheet, skip: &HashSet<String>) -> Self {
        let mut answers: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut order = Vec::new();

        for sign_up in sheet.sign_ups {
            let name = sign_up.full_name.trim().to_string();
            if skip.contains(&name) {
                debug!("Discarding skip-listed sign-up for {name}");
                continue;
            }
            if answers.contains_key(&name) {
                crate::warn!("Duplicate sign-up for {name}; using the later submission");
            } else {
                order.push(name.clone());
            }
            answers.insert(name, sign_up.answers.into_iter().collect());
        }

        Self {
            areas: sheet.areas,
            answers,
            order,
        }
    }

    /// Remove and return one preference per known area for `name`
    fn take(&mut self, name: &str) -> Option<Vec<Preference>> {
        let answers = self.answers.remove(name)?;
        Some(
            self.areas
                .iter()
                .map(|area| {
                    let label = answers.get(area).map_or("", String::as_str);
                    Preference::new(area.clone(), label)
                })
                .collect(),
        )
    }

    /// Everyone wildly interested in everything, so they sort last
    fn defaults(&self) -> Vec<Preference> {
        self.areas
            .iter()
            .map(|area| Preference::with_level(area.clone(), Interest::Very))
            .collect()
    }

    fn leftovers(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| self.answers.contains_key(*name))
            .cloned()
            .collect()
    }
}

fn build_student<R: Rng + ?Sized>(
    record: StudentRecord,
    sign_ups: &mut SignUpIndex,
    skip: &HashSet<String>,
    seen: &mut HashSet<String>,
    notices: &mut Vec<Notice>,
    rng: &mut R,
) -> Result<Student, SetupError> {
    let name = full_name(&record.first_name, &record.last_name);
    if !seen.insert(name.clone()) {
        return Err(SetupError::DuplicateStudent(name));
    }
    if skip.contains(&name) {
        return Err(SetupError::SkipListedStudent(name));
    }

    let mut student = Student::new(
        &record.first_name,
        &record.last_name,
        record.grade,
        record.teacher.trim(),
        record.stream.trim(),
    );

    let preferences = sign_ups.take(&name).unwrap_or_else(|| {
        let notice = Notice::MissingSignUp {
            student: name.clone(),
        };
        crate::warn!("{notice}");
        notices.push(notice);
        sign_ups.defaults()
    });
    student.set_preferences(preferences, rng);

    Ok(student)
}

fn resolve_manual(
    rows: &[ManualAssignment],
    catalog: &Catalog,
    students: &[Student],
) -> Result<Vec<(usize, usize)>, SetupError> {
    let by_name: HashMap<&str, usize> = students
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.name.as_str(), idx))
        .collect();

    let mut claimed = HashSet::new();
    let mut resolved = Vec::with_capacity(rows.len());
    for row in rows {
        let course_id = row.class_id.trim();
        let student = row.student_full_name.trim();

        let course_idx = catalog
            .index_of(course_id)
            .ok_or_else(|| SetupError::UnknownCourse {
                course_id: course_id.to_string(),
                student: student.to_string(),
            })?;
        let student_idx = by_name
            .get(student)
            .copied()
            .ok_or_else(|| SetupError::UnknownStudent {
                course_id: course_id.to_string(),
                student: student.to_string(),
            })?;
        if !claimed.insert(student_idx) {
            return Err(SetupError::DuplicateManualAssignment(student.to_string()));
        }

        resolved.push((course_idx, student_idx));
    }
    Ok(resolved)
}
