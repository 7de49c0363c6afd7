use crate::{
    application::list_users::use_case::ListUsersUseCase,
    domain::user::entity::UserRecord,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{Json, extract::State};

pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, AppError> {
    let users = ListUsersUseCase::new(state.user_repo.clone()).execute().await?;
    tracing::debug!("Listing {} users", users.len());
    Ok(Json(users))
}
