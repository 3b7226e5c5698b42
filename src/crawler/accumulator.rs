use crate::model::Course;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Course records under construction, keyed by detail page URL
///
/// Every mutation goes through [`CourseAccumulator::update`], which takes
/// the single lock, so concurrent region handlers for one page never
/// interleave within a handler.
#[derive(Debug, Default)]
pub struct CourseAccumulator {
    courses: Mutex<BTreeMap<String, Course>>,
}

impl CourseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `f` to the record for `url`, creating it first if needed
    ///
    /// A new record starts with its identity derived from the URL.
    pub fn update<R>(&self, url: &str, f: impl FnOnce(&mut Course) -> R) -> R {
        let mut courses = self.lock();
        let course = courses
            .entry(url.to_string())
            .or_insert_with(|| Course::from_detail_url(url));
        f(course)
    }

    /// Returns a copy of the record for `url`
    pub fn get(&self, url: &str) -> Option<Course> {
        self.lock().get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies out every record, ordered by URL
    pub fn snapshot(&self) -> Vec<Course> {
        self.lock().values().cloned().collect()
    }

    /// Consumes the accumulator, returning every record ordered by URL
    pub fn into_courses(self) -> Vec<Course> {
        self.courses
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_values()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Course>> {
        self.courses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
