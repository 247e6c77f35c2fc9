// Entity Models
//
// Teacher: integer identity assigned by the store, values replaced in place

pub mod teacher;

pub use teacher::{NewTeacher, Teacher, TeacherUpdate};
