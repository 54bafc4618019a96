pub mod buzzer_round;
pub mod course;
pub mod rollcall_record;
pub mod rollcall_session;
pub mod user;
