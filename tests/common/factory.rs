use uuid::Uuid;

use timetable_planner::entity::sea_orm_active_enums::{Term, Weekday};
use timetable_planner::models::{
    Course, CourseKey, CreateTimetable, NewUser, TimeSlot, Timetable, UpsertCourse, User,
};
use timetable_planner::repositories::{
    CourseRepository, CourseTimeSlotRepository, TimetableRepository, UserRepository,
};
use timetable_planner::services::AuthService;
use timetable_planner::state::AppState;

/// Authentication info for tests
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);
        let password = "TestPassword123!";

        let user = self.create_user_with_email(&email, password).await;
        let token = AuthService::generate_token(user.id, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Register an account directly through the repository
    pub async fn create_user_with_email(&self, email: &str, password: &str) -> User {
        let password_hash = AuthService::hash_password(password).unwrap();
        let input = NewUser::new(email, "김학생", password_hash);

        UserRepository::create(&self.state.db, &input).await.unwrap()
    }

    /// Create a catalog course with the given weekly slots
    pub async fn create_course(
        &self,
        year: i32,
        term: Term,
        title: &str,
        credit: i32,
        slots: &[(Weekday, i32, i32)],
    ) -> Course {
        let key = CourseKey {
            year,
            term,
            course_code: format!("C{}", &Uuid::new_v4().simple().to_string()[..8]),
            class_code: "001".to_string(),
        };
        let input = UpsertCourse {
            category: Some("전공".to_string()),
            college: Some("공과대학".to_string()),
            department: Some("컴퓨터공학부".to_string()),
            program: Some("학사".to_string()),
            grade: Some(2),
            title: title.to_string(),
            credit,
            professor: Some("홍길동".to_string()),
            room: None,
            raw_time: None,
        };

        let (course, _) = CourseRepository::upsert(&self.state.db, &key, &input)
            .await
            .unwrap();

        let slots: Vec<TimeSlot> = slots
            .iter()
            .map(|(day, start_min, end_min)| TimeSlot {
                day: *day,
                start_min: *start_min,
                end_min: *end_min,
                place: None,
            })
            .collect();
        CourseTimeSlotRepository::replace_for_course(&self.state.db, course.id, &slots)
            .await
            .unwrap();

        course
    }

    /// Create a fall 2025 course
    pub async fn create_fall_course(&self, title: &str, slots: &[(Weekday, i32, i32)]) -> Course {
        self.create_course(2025, Term::Fall, title, 3, slots).await
    }

    /// Create a timetable directly through the repository
    pub async fn create_timetable(
        &self,
        user_id: Uuid,
        name: &str,
        year: i32,
        semester: Term,
    ) -> Timetable {
        let input = CreateTimetable {
            name: name.to_string(),
            year,
            semester,
        };

        TimetableRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }
}
