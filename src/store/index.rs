use crate::config::IdentityPolicy;
use crate::model::{course_key, Course, SubjectSummary};
use crate::store::files::{list_batch_files, read_batch};
use crate::store::StoreResult;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// In-memory indices over every course batch of a data directory
///
/// Built once by [`CourseStore::load`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CourseStore {
    courses: Vec<Course>,
    /// Term code -> positions in `courses`
    by_quarter: HashMap<i32, Vec<usize>>,
    /// Course key -> positions in `courses`, in load order
    by_key: HashMap<String, Vec<usize>>,
    /// Subject -> course key -> merged summary
    by_subject: HashMap<String, BTreeMap<String, SubjectSummary>>,
    /// Indexed term codes, newest first
    quarters: Vec<i32>,
    files_loaded: usize,
    excluded: usize,
}

/// Summary of what a loaded store holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatistics {
    pub files_loaded: usize,
    pub total_courses: usize,
    pub excluded_courses: usize,
    pub subjects: usize,
    pub course_keys: usize,
    /// Course count per term, newest term first
    pub courses_per_quarter: Vec<(i32, usize)>,
}

impl CourseStore {
    /// Loads and indexes every `*.json` batch in `dir`
    ///
    /// Files are read in path order. Any unreadable or malformed file fails
    /// the whole load.
    pub fn load(dir: &Path, policy: IdentityPolicy) -> StoreResult<Self> {
        let files = list_batch_files(dir)?;
        let mut store = Self::default();

        for file in &files {
            let courses = read_batch(file)?;
            tracing::debug!("Loaded {} courses from {}", courses.len(), file.display());
            store.extend(courses, policy);
        }
        store.files_loaded = files.len();

        tracing::info!(
            "Indexed {} courses from {} files across {} terms",
            store.courses.len(),
            store.files_loaded,
            store.quarters.len()
        );
        Ok(store)
    }

    /// Builds a store from courses already in memory
    pub fn from_courses(courses: Vec<Course>, policy: IdentityPolicy) -> Self {
        let mut store = Self::default();
        store.extend(courses, policy);
        store
    }

    fn extend(&mut self, courses: Vec<Course>, policy: IdentityPolicy) {
        for course in courses {
            if policy == IdentityPolicy::Exclude && (course.quarter == 0 || course.section == 0) {
                tracing::debug!("Excluding {} with unparsed term or section", course.url);
                self.excluded += 1;
                continue;
            }
            self.insert(course);
        }

        let mut quarters: Vec<i32> = self.by_quarter.keys().copied().collect();
        quarters.sort_unstable_by(|a, b| b.cmp(a));
        self.quarters = quarters;
    }

    fn insert(&mut self, course: Course) {
        let position = self.courses.len();
        let key = course_key(&course.subject, &course.number);

        if course.quarter > 0 {
            self.by_quarter
                .entry(course.quarter)
                .or_default()
                .push(position);
        }
        self.by_key.entry(key.clone()).or_default().push(position);

        let summaries = self.by_subject.entry(course.subject.clone()).or_default();
        match summaries.get_mut(&key) {
            Some(summary) => merge_summary(summary, &course),
            None => {
                summaries.insert(
                    key,
                    SubjectSummary {
                        title: course.title.clone(),
                        number: course.number.clone(),
                        topic: course.topic.clone(),
                        overview: course.overview.clone(),
                        quarters: vec![course.quarter],
                    },
                );
            }
        }

        self.courses.push(course);
    }

    /// Courses offered in a term
    pub fn courses_by_quarter(&self, quarter: i32) -> Vec<&Course> {
        self.lookup(self.by_quarter.get(&quarter))
    }

    /// Every offering of one course key, in load order
    pub fn courses_by_key(&self, key: &str) -> Vec<&Course> {
        self.lookup(self.by_key.get(key))
    }

    /// Merged summaries of a subject's courses, sorted by course key
    pub fn courses_by_subject(&self, subject: &str) -> Vec<&SubjectSummary> {
        self.by_subject
            .get(subject)
            .map(|summaries| summaries.values().collect())
            .unwrap_or_default()
    }

    /// Indexed term codes, newest first
    pub fn available_quarters(&self) -> &[i32] {
        &self.quarters
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            files_loaded: self.files_loaded,
            total_courses: self.courses.len(),
            excluded_courses: self.excluded,
            subjects: self.by_subject.len(),
            course_keys: self.by_key.len(),
            courses_per_quarter: self
                .quarters
                .iter()
                .map(|quarter| (*quarter, self.by_quarter.get(quarter).map_or(0, Vec::len)))
                .collect(),
        }
    }

    fn lookup(&self, positions: Option<&Vec<usize>>) -> Vec<&Course> {
        positions
            .map(|positions| positions.iter().map(|&i| &self.courses[i]).collect())
            .unwrap_or_default()
    }
}

/// Folds another offering of a course into its summary
///
/// The earliest term's offering supplies the title, number, topic and
/// overview. Each term is listed once.
fn merge_summary(summary: &mut SubjectSummary, course: &Course) {
    if summary.quarters.contains(&course.quarter) {
        return;
    }
    if summary.quarters.iter().all(|&quarter| course.quarter < quarter) {
        summary.title = course.title.clone();
        summary.number = course.number.clone();
        summary.topic = course.topic.clone();
        summary.overview = course.overview.clone();
    }
    summary.quarters.push(course.quarter);
}
