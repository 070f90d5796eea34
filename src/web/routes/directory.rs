use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::activities_service::{self, DirectoryQuery};

#[derive(Template)]
#[template(path = "activities.html")]
pub struct DirectoryTemplate {
    pub activities: Vec<activities_service::ActivityCardView>,
    pub filters: activities_service::AppliedDirectoryFilters,
    pub category_options: Vec<activities_service::FilterOptionView>,
    pub day_options: Vec<activities_service::FilterOptionView>,
    pub when_options: Vec<activities_service::FilterOptionView>,
}

pub async fn directory_handler(
    Query(query): Query<DirectoryQuery>,
    State(pool): State<SqlitePool>,
) -> Html<String> {
    let data = match activities_service::build_directory_page(&pool, &query).await {
        Ok(data) => data,
        Err(e) => {
            warn!("Directory page load failed: {}", e);
            activities_service::build_empty_page()
        }
    };

    let template = DirectoryTemplate {
        activities: data.activities,
        filters: data.filters,
        category_options: data.category_options,
        day_options: data.day_options,
        when_options: data.when_options,
    };
    Html(template.render().unwrap())
}
