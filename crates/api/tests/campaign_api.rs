//! Campaigns, parties and the membership rules between them.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_campaign, create_character, delete, get, patch_json, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn join_campaign(pool: &PgPool, campaign_id: i64, body: Value) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &format!("/api/v1/campaigns/{campaign_id}/characters"), body).await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn create_party(pool: &PgPool, campaign_id: i64, body: Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &format!("/api/v1/campaigns/{campaign_id}/parties"), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn join_party(
    pool: &PgPool,
    campaign_id: i64,
    party_id: i64,
    character_id: i64,
) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/campaigns/{campaign_id}/parties/{party_id}/members"),
        json!({ "character_id": character_id }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Campaign CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_campaign_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/campaigns",
        json!({ "name": "The Sigil", "master_name": "Mara" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign_created");
    assert_eq!(json["data"]["system"], "Sigil RPG");
    assert_eq!(json["data"]["max_players"], 6);
    assert_eq!(json["data"]["is_active"], true);
    assert_eq!(json["data"]["is_public"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_capacity_out_of_range_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/campaigns",
        json!({ "name": "Huge", "master_name": "Mara", "max_players": 51 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["max_players"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_campaign_includes_members_and_parties(pool: PgPool) {
    let campaign = create_campaign(&pool, "Detail", None).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
    create_party(&pool, campaign, json!({ "name": "Vanguard" })).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{campaign}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign");
    assert_eq!(json["data"]["name"], "Detail");
    assert_eq!(json["data"]["memberships"][0]["character_id"], hero);
    assert_eq!(json["data"]["parties"][0]["name"], "Vanguard");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_campaign(pool: PgPool) {
    let campaign = create_campaign(&pool, "Before", None).await;

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/campaigns/{campaign}"),
        json!({ "name": "After", "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign_updated");
    assert_eq!(json["data"]["name"], "After");
    assert_eq!(json["data"]["is_active"], false);
    assert_eq!(json["data"]["master_name"], "The GM");
}

// ---------------------------------------------------------------------------
// Campaign memberships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_join_is_duplicate_and_first_row_unchanged(pool: PgPool) {
    let campaign = create_campaign(&pool, "Dupes", None).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;

    let (status, json) = join_campaign(
        &pool,
        campaign,
        json!({ "character_id": hero, "role": "tank" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "campaign_character_added");

    let (status, json) = join_campaign(
        &pool,
        campaign,
        json!({ "character_id": hero, "role": "healer" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "duplicate_membership");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{campaign}/characters")).await;
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign_characters");
    let members = json["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "tank");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_with_unknown_character_or_campaign_is_404(pool: PgPool) {
    let campaign = create_campaign(&pool, "Lonely", None).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;

    let (status, json) = join_campaign(&pool, campaign, json!({ "character_id": 999999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "character_not_found");

    let (status, json) = join_campaign(&pool, 999999, json!({ "character_id": hero })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "campaign_not_found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_campaign_rejects_active_joins_only(pool: PgPool) {
    let campaign = create_campaign(&pool, "Tiny", Some(1)).await;
    let first = create_character(&pool, json!({ "name": "First" })).await;
    let second = create_character(&pool, json!({ "name": "Second" })).await;

    let (status, _) = join_campaign(&pool, campaign, json!({ "character_id": first })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = join_campaign(&pool, campaign, json!({ "character_id": second })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "campaign_full");

    // A benched member takes no seat.
    let (status, json) = join_campaign(
        &pool,
        campaign,
        json!({ "character_id": second, "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["is_active"], false);

    // ...until reactivated.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/campaigns/{campaign}/characters/{second}"),
        json!({ "is_active": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "campaign_full");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_membership_stays_queryable(pool: PgPool) {
    let campaign = create_campaign(&pool, "Bench", None).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/campaigns/{campaign}/characters/{hero}"),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign_character_updated");
    assert_eq!(json["data"]["is_active"], false);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{campaign}/characters/{hero}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign_character");
    assert_eq!(json["data"]["is_active"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_membership(pool: PgPool) {
    let campaign = create_campaign(&pool, "Leaving", None).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;

    let uri = format!("/api/v1/campaigns/{campaign}/characters/{hero}");
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "campaign_character_removed");

    let app = common::build_test_app(pool);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "campaign_character_not_found");
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_party_requires_active_campaign_membership(pool: PgPool) {
    let campaign = create_campaign(&pool, "Gatekeeping", None).await;
    let party = create_party(&pool, campaign, json!({ "name": "Vanguard" })).await;
    let stranger = create_character(&pool, json!({ "name": "Stranger" })).await;
    let benched = create_character(&pool, json!({ "name": "Benched" })).await;
    let member = create_character(&pool, json!({ "name": "Member" })).await;

    join_campaign(&pool, campaign, json!({ "character_id": benched, "is_active": false })).await;
    join_campaign(&pool, campaign, json!({ "character_id": member })).await;

    let (status, json) = join_party(&pool, campaign, party, stranger).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "character_not_in_campaign");

    let (status, json) = join_party(&pool, campaign, party, benched).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "character_not_in_campaign");

    let (status, json) = join_party(&pool, campaign, party, member).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "party_member_added");

    let (status, json) = join_party(&pool, campaign, party, member).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "duplicate_membership");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_party_rejects_joins(pool: PgPool) {
    let campaign = create_campaign(&pool, "Squads", None).await;
    let party = create_party(&pool, campaign, json!({ "name": "Duo", "max_members": 1 })).await;
    let first = create_character(&pool, json!({ "name": "First" })).await;
    let second = create_character(&pool, json!({ "name": "Second" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": first })).await;
    join_campaign(&pool, campaign, json!({ "character_id": second })).await;

    let (status, _) = join_party(&pool, campaign, party, first).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = join_party(&pool, campaign, party, second).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "party_full");

    // The rejected join left no row behind.
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/campaigns/{campaign}/parties/{party}/members"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_join_into_full_campaign_is_duplicate(pool: PgPool) {
    let campaign = create_campaign(&pool, "Solo", Some(1)).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    let late = create_character(&pool, json!({ "name": "Late" })).await;

    let (status, _) = join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "duplicate_membership");

    let (status, json) = join_campaign(&pool, campaign, json!({ "character_id": late })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "campaign_full");

    // The seat check rolled the insert back.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{campaign}/characters/{late}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_join_into_full_party_is_duplicate(pool: PgPool) {
    let campaign = create_campaign(&pool, "Pairs", None).await;
    let party = create_party(&pool, campaign, json!({ "name": "Lone", "max_members": 1 })).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;

    let (status, _) = join_party(&pool, campaign, party, hero).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = join_party(&pool, campaign, party, hero).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "duplicate_membership");

    // Still a duplicate after the campaign membership is benched.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/campaigns/{campaign}/characters/{hero}"),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (status, json) = join_party(&pool, campaign, party, hero).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "duplicate_membership");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_party_from_another_campaign_is_404(pool: PgPool) {
    let home = create_campaign(&pool, "Home", None).await;
    let away = create_campaign(&pool, "Away", None).await;
    let party = create_party(&pool, home, json!({ "name": "Locals" })).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{away}/parties/{party}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "party_not_found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_party_member_update_and_remove(pool: PgPool) {
    let campaign = create_campaign(&pool, "Roles", None).await;
    let party = create_party(&pool, campaign, json!({ "name": "Vanguard" })).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
    join_party(&pool, campaign, party, hero).await;

    let uri = format!("/api/v1/campaigns/{campaign}/parties/{party}/members/{hero}");
    let app = common::build_test_app(pool.clone());
    let response = patch_json(app, &uri, json!({ "role": "scout" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "party_member_updated");
    assert_eq!(json["data"]["role"], "scout");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "party_member_removed");

    let app = common::build_test_app(pool);
    let response = delete(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "party_member_not_found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_party_reports_members(pool: PgPool) {
    let campaign = create_campaign(&pool, "Split", None).await;
    let party = create_party(&pool, campaign, json!({ "name": "Vanguard" })).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
    join_party(&pool, campaign, party, hero).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/campaigns/{campaign}/parties/{party}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "party_deleted");
    assert_eq!(json["data"]["party_memberships"], 1);

    // The campaign membership survives the party.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{campaign}/characters/{hero}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_campaign_removes_parties_and_memberships(pool: PgPool) {
    let campaign = create_campaign(&pool, "Doomed", None).await;
    let alpha = create_party(&pool, campaign, json!({ "name": "Alpha" })).await;
    let beta = create_party(&pool, campaign, json!({ "name": "Beta" })).await;

    let mut heroes = Vec::new();
    for name in ["A", "B", "C"] {
        let hero = create_character(&pool, json!({ "name": name })).await;
        join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
        heroes.push(hero);
    }
    join_party(&pool, campaign, alpha, heroes[0]).await;
    join_party(&pool, campaign, beta, heroes[1]).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/campaigns/{campaign}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "campaign_deleted");
    assert_eq!(
        json["data"],
        json!({ "party_memberships": 2, "parties": 2, "campaign_memberships": 3 })
    );

    let gone = [
        format!("/api/v1/campaigns/{campaign}"),
        format!("/api/v1/campaigns/{campaign}/parties/{alpha}"),
        format!("/api/v1/campaigns/{campaign}/parties/{beta}"),
        format!("/api/v1/campaigns/{campaign}/characters/{}", heroes[0]),
        format!("/api/v1/campaigns/{campaign}/characters/{}", heroes[2]),
    ];
    for uri in gone {
        let app = common::build_test_app(pool.clone());
        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    // Characters outlive the campaign.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/characters/{}", heroes[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_character_leaves_campaign_and_party(pool: PgPool) {
    let campaign = create_campaign(&pool, "Survivors", None).await;
    let party = create_party(&pool, campaign, json!({ "name": "Vanguard" })).await;
    let hero = create_character(&pool, json!({ "name": "Hero" })).await;
    join_campaign(&pool, campaign, json!({ "character_id": hero })).await;
    join_party(&pool, campaign, party, hero).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/characters/{hero}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["party_memberships"], 1);
    assert_eq!(json["data"]["campaign_memberships"], 1);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/campaigns/{campaign}")).await;
    let json = body_json(response).await;
    assert!(json["data"]["memberships"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["parties"].as_array().unwrap().len(), 1);
}
