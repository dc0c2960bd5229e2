//! Integration smoke tests for `exam_routine`

use exam_routine::config::Config;
use exam_routine::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn builtin_departments_resolve() {
    let config = Config::from_defaults();
    assert_eq!(config.department("cse").unwrap().name, "CSE Department");
    assert_eq!(config.department("swe").unwrap().name, "SWE Department");
}
