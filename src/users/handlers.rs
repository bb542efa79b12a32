use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use minijinja::context;
use tracing::{info, instrument};

use crate::{
    error::AppError,
    state::AppState,
    users::{
        dto::{parse_id, UserForm},
        repo::{SaveUser, UserProfile},
    },
    views::View,
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(submit_user))
        .route("/addUser", get(add_user_form))
        .route("/editUser/:id", get(edit_user_form))
}

// Delete stays reachable by GET for old links; the pages themselves post.
pub fn delete_routes() -> Router<AppState> {
    Router::new().route("/deleteUser/:id", get(delete_user).post(delete_user))
}

/// 302 back to the list page.
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = state.users.list_users().await?;
    state.views.page(View::Index, context! { users => users })
}

#[instrument(skip(state))]
pub async fn edit_user_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&raw_id)?;
    let user = state.users.get_user(id).await?;
    state.views.page(View::EditUser, context! { user => user })
}

#[instrument(skip(state))]
pub async fn add_user_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .views
        .page(View::AddUser, context! { user => UserProfile::default() })
}

#[instrument(skip(state, form))]
pub async fn submit_user(
    State(state): State<AppState>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let cmd = form.into_command()?;
    let created = matches!(cmd, SaveUser::Create(_));
    let user = state.users.save_user(cmd).await?;
    info!(user_id = user.id, created, "user saved");
    Ok(redirect_home())
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id)?;
    state.users.delete_user(id).await?;
    info!(user_id = id, "user deleted");
    Ok(redirect_home())
}
