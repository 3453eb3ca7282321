mod common;

use common::{Backend, TestEnv};
use mealplan_client::Region;
use serde_json::json;

fn full_backend() -> Backend {
    let backend = Backend::new();
    backend
        .respond(
            "GET",
            "/api/user",
            200,
            json!({"username": "ana", "diet_type": "vegan", "cooking_skill": "advanced"}),
        )
        .respond(
            "GET",
            "/api/dashboard/stats",
            200,
            json!({"pantry_count": 10, "expiring_count": 2, "recipes_tried": 5}),
        )
        .respond(
            "GET",
            "/api/pantry/ingredients",
            200,
            json!((0..10)
                .map(|i| json!({"id": format!("item_{i}"), "quantity": 1, "unit": "pcs"}))
                .collect::<Vec<_>>()),
        );
    backend
}

#[tokio::test]
async fn test_dashboard_init_loads_everything_in_order() {
    let env = TestEnv::new(full_backend()).await;

    env.app.on_load("/dashboard").await;

    assert_eq!(
        env.backend.paths(),
        vec![
            "GET /api/user",
            "GET /api/dashboard/stats",
            "GET /api/pantry/ingredients"
        ]
    );

    assert_eq!(env.view.text(Region::UserWelcome).as_deref(), Some("Welcome, ana"));
    assert_eq!(env.view.text(Region::UserDiet).as_deref(), Some("vegan"));
    assert_eq!(env.view.text(Region::UserSkill).as_deref(), Some("advanced"));

    assert_eq!(env.view.text(Region::PantryCount).as_deref(), Some("10"));
    assert_eq!(env.view.text(Region::ExpiringCount).as_deref(), Some("2"));
    assert_eq!(env.view.text(Region::RecipesTried).as_deref(), Some("5"));
    assert_eq!(env.view.text(Region::DaysStreak).as_deref(), Some("0"));

    let overview = env.view.html(Region::PantryOverview).unwrap();
    assert!(overview.contains(">item 0<"));
    assert!(overview.ends_with(r#"<span class="pantry-item">+2 more</span>"#));
}

#[tokio::test]
async fn test_root_path_runs_dashboard_init() {
    let env = TestEnv::new(full_backend()).await;

    env.app.on_load("/").await;

    assert_eq!(env.backend.requests().len(), 3);
}

#[tokio::test]
async fn test_user_error_leaves_dashboard_untouched() {
    let backend = full_backend();
    backend.respond("GET", "/api/user", 200, json!({"error": "Session expired"}));
    let env = TestEnv::new(backend).await;

    env.app.dashboard.init().await;

    assert!(env.view.text(Region::UserWelcome).is_none());
    assert!(env.view.text(Region::UserDiet).is_none());
    assert!(env.view.text(Region::UserSkill).is_none());
    assert!(env.view.alert().is_none());
    assert_eq!(env.backend.paths(), vec!["GET /api/user"]);
}

#[tokio::test]
async fn test_stats_failure_is_silent() {
    let backend = full_backend();
    backend.respond("GET", "/api/dashboard/stats", 503, json!({}));
    let env = TestEnv::new(backend).await;

    env.app.dashboard.init().await;

    assert!(env.view.text(Region::PantryCount).is_none());
    assert!(env.view.alert().is_none());
    // Overview still loads after the stats failure
    assert!(env.view.html(Region::PantryOverview).is_some());
}

#[tokio::test]
async fn test_profile_defaults_when_fields_missing() {
    let backend = full_backend();
    backend.respond("GET", "/api/user", 200, json!({"username": "bo"}));
    let env = TestEnv::new(backend).await;

    env.app.dashboard.init().await;

    assert_eq!(env.view.text(Region::UserDiet).as_deref(), Some("Not set"));
    assert_eq!(env.view.text(Region::UserSkill).as_deref(), Some("beginner"));
}

#[tokio::test]
async fn test_empty_pantry_leaves_overview_alone() {
    let backend = full_backend();
    backend.respond("GET", "/api/pantry/ingredients", 200, json!([]));
    let env = TestEnv::new(backend).await;

    env.app.dashboard.init().await;

    assert!(env.view.html(Region::PantryOverview).is_none());
}

#[tokio::test]
async fn test_other_pages_load_nothing() {
    let env = TestEnv::new(full_backend()).await;

    env.app.on_load("/suggestions").await;
    env.app.on_load("/mealplan").await;

    assert!(env.backend.requests().is_empty());
}
