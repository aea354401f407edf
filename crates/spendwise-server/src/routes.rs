//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use spendwise_core::{BudgetRecommendation, Expense, Insights, NewExpense};
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/", get(list_expenses).post(create_expense))
        .route("/insights", get(insights))
        .route("/insights/", get(insights))
        .route("/budget-recommendations", get(budget_recommendations))
        .route("/budget-recommendations/", get(budget_recommendations))
        .route("/categorize", post(categorize))
        .route("/categorize/", post(categorize))
        .fallback(fallback)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let cors = &state.config.cors;
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors.allow_any_origin {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "AI Expense Tracker API is running" }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Predict a category, recording latency
fn predict_category(state: &AppState, description: &str) -> Result<String, AppError> {
    let start = Instant::now();
    let category = state.classifier.predict(description)?;

    metrics::counter!("spendwise_predictions_total", "category" => category.clone()).increment(1);
    metrics::histogram!("spendwise_predict_latency_us")
        .record(start.elapsed().as_micros() as f64);
    Ok(category)
}

async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    metrics::counter!("spendwise_requests_total", "endpoint" => "create_expense").increment(1);
    let Json(req) = payload?;
    let expense = req.validate()?;

    let category = match expense.explicit_category() {
        Some(category) => category.to_string(),
        None => {
            let category = predict_category(&state, expense.description())?;
            debug!("Auto-categorized '{}' as {}", expense.description(), category);
            category
        }
    };

    let draft = expense.into_draft(category);
    let expense = state.store.create(draft).await?;
    metrics::counter!("spendwise_expenses_created_total").increment(1);
    info!(
        "Created expense {} ({}, {:.2})",
        expense.id, expense.category, expense.amount
    );

    Ok((StatusCode::OK, Json(expense)))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    skip: Option<usize>,
    limit: Option<usize>,
}

async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Expense>>, AppError> {
    metrics::counter!("spendwise_requests_total", "endpoint" => "list_expenses").increment(1);
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(state.config.default_page_size);
    info!("Getting expenses with skip={}, limit={}", skip, limit);

    let expenses = state.store.list(skip, limit).await?;
    info!("Found {} expenses", expenses.len());
    Ok(Json(expenses))
}

async fn insights(State(state): State<AppState>) -> Result<Json<Insights>, AppError> {
    metrics::counter!("spendwise_requests_total", "endpoint" => "insights").increment(1);
    let expenses = state.store.all().await?;
    let insights = Insights::from_expenses(&expenses);
    info!(
        "Generated insights: total_spent={}, categories={}",
        insights.total_spent,
        insights.category_totals.len()
    );
    Ok(Json(insights))
}

async fn budget_recommendations(
    State(state): State<AppState>,
) -> Result<Json<BudgetRecommendation>, AppError> {
    metrics::counter!("spendwise_requests_total", "endpoint" => "budget_recommendations")
        .increment(1);
    let expenses = state.store.all().await?;
    Ok(Json(BudgetRecommendation::from_expenses(&expenses)))
}

#[derive(Debug, Deserialize)]
struct CategorizeRequest {
    description: String,
}

#[derive(Debug, Serialize)]
struct CategorizeResponse {
    category: String,
}

async fn categorize(
    State(state): State<AppState>,
    payload: Result<Json<CategorizeRequest>, JsonRejection>,
) -> Result<Json<CategorizeResponse>, AppError> {
    metrics::counter!("spendwise_requests_total", "endpoint" => "categorize").increment(1);
    let Json(req) = payload?;
    let category = predict_category(&state, &req.description)?;
    Ok(Json(CategorizeResponse { category }))
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
