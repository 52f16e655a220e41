use chrono::NaiveDate;

pub struct UserCreateRequest {
    pub email: String,
    pub name: Option<String>,
}

pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub birth_time: Option<String>,
    pub birth_place: Option<String>,
}
