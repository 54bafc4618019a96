/// Topic carrying the active-session feed for one course.
pub fn rollcall_course_topic(course_id: i64) -> String {
    format!("rollcall:course:{course_id}")
}

/// Topic carrying the full record set for one session.
pub fn rollcall_session_topic(session_id: i64) -> String {
    format!("rollcall:session:{session_id}")
}
