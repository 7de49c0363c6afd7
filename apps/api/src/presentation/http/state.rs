use crate::{
    config::Config, domain::user::repository::UserRepository,
    infrastructure::reports::traits::ErrorReportStore,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub error_reports: Arc<dyn ErrorReportStore>,
}
