/// Topic carrying the latest-round feed for one course.
pub fn buzzer_course_topic(course_id: i64) -> String {
    format!("buzzer:course:{course_id}")
}
