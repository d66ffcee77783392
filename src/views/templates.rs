use askama::Template;

use super::PageContext;
use crate::models::{
    FormErrors,
    assignments::{
        entities::Assignment,
        requests::{AssignmentForm, DeleteAssignmentForm},
    },
    auth::requests::{LoginForm, RegistrationForm},
    courses::{
        entities::{Course, CourseSummary},
        requests::{CreateCourseForm, DeleteCourseForm, EnrollForm},
    },
    users::entities::User,
};

#[derive(Template)]
#[template(path = "codeta/home.html")]
pub struct HomePage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "codeta/static.html")]
pub struct StaticPage {
    pub page: PageContext,
    pub heading: String,
    pub body: String,
}

#[derive(Template)]
#[template(path = "util/error.html")]
pub struct ErrorPage {
    pub page: PageContext,
    pub heading: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "user/join.html")]
pub struct JoinPage {
    pub page: PageContext,
    pub form: RegistrationForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "user/login.html")]
pub struct LoginPage {
    pub page: PageContext,
    pub form: LoginForm,
    pub errors: FormErrors,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "user/logout.html")]
pub struct LogoutPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "user/home.html")]
pub struct UserHomePage {
    pub page: PageContext,
    pub owner: String,
    pub teaching: Vec<CourseSummary>,
    pub enrolled: Vec<CourseSummary>,
}

#[derive(Template)]
#[template(path = "user/settings.html")]
pub struct SettingsPage {
    pub page: PageContext,
    pub user: User,
    pub base_url: String,
    pub name_errors: FormErrors,
    pub email_errors: FormErrors,
    pub password_errors: FormErrors,
}

#[derive(Template)]
#[template(path = "course/new.html")]
pub struct CourseCreatePage {
    pub page: PageContext,
    pub action: String,
    pub form: CreateCourseForm,
    pub errors: FormErrors,
}

/// 课程主页上的一行作业及其操作链接
#[derive(Debug, Clone)]
pub struct AssignmentRow {
    pub assignment: Assignment,
    pub edit_url: String,
    pub delete_url: String,
    pub submit_url: String,
}

#[derive(Template)]
#[template(path = "course/home.html")]
pub struct CourseHomePage {
    pub page: PageContext,
    pub owner: String,
    pub course: Course,
    pub base_url: String,
    pub assignments: Vec<AssignmentRow>,
    pub is_instructor: bool,
}

#[derive(Template)]
#[template(path = "course/delete.html")]
pub struct CourseDeletePage {
    pub page: PageContext,
    pub course: Course,
    pub action: String,
    pub form: DeleteCourseForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "course/enroll.html")]
pub struct EnrollPage {
    pub page: PageContext,
    pub course: Course,
    pub base_url: String,
    pub students: Vec<User>,
    pub form: EnrollForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "assignment/form.html")]
pub struct AssignmentFormPage {
    pub page: PageContext,
    pub course: Course,
    pub heading: String,
    pub action: String,
    pub back_url: String,
    pub form: AssignmentForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "assignment/delete.html")]
pub struct AssignmentDeletePage {
    pub page: PageContext,
    pub course: Course,
    pub assignment: Assignment,
    pub action: String,
    pub back_url: String,
    pub form: DeleteAssignmentForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "assignment/submit.html")]
pub struct SubmitPage {
    pub page: PageContext,
    pub course: Course,
    pub assignment: Assignment,
    pub action: String,
    pub back_url: String,
}
